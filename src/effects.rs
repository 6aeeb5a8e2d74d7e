use rand::seq::SliceRandom;

/// Particle for the hit-burst animation played when a word is destroyed
#[derive(Debug, Clone)]
pub struct BurstParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub age: f64,
    pub max_age: f64,
}

impl BurstParticle {
    fn new(x: f64, y: f64) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: rng.gen_range(-20.0..20.0),
            vel_y: rng.gen_range(-15.0..5.0),
            symbol: *['*', '+', 'x', '·'].choose(&mut rng).unwrap_or(&'*'),
            age: 0.0,
            max_age: rng.gen_range(0.3..0.6),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += 60.0 * dt; // gravity, in percent/s^2

        self.age += dt;
        self.age < self.max_age
    }
}

/// Short burst of particles at the position of a destroyed word.
/// Positions are play-field percentages, like the word tokens themselves.
#[derive(Debug, Default)]
pub struct HitBurst {
    pub particles: Vec<BurstParticle>,
    pub is_active: bool,
}

impl HitBurst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, x: f64, y: f64) {
        for _ in 0..8 {
            self.particles.push(BurstParticle::new(x, y));
        }
        self.is_active = true;
    }

    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.particles.retain_mut(|p| {
            let still_alive = p.update(dt);
            still_alive && p.y < 110.0 && p.x > -10.0 && p.x < 110.0
        });

        if self.particles.is_empty() {
            self.is_active = false;
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.is_active = false;
    }
}
