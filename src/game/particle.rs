use rand::Rng;

/// Particles spawned per consumption event
pub const BURST_SIZE: usize = 10;
/// Radius lost by every particle each tick
pub const RADIUS_DECAY: f32 = 0.1;
/// Largest speed component, in pixels per tick
const MAX_SPEED: f32 = 2.0;

/// A single cosmetic dot. Its radius doubles as its remaining life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

impl Particle {
    fn step(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
        self.radius -= RADIUS_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.radius > 0.0
    }
}

/// A self-pruning swarm of particles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
}

impl ParticleBurst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a burst of particles around (x, y) with random velocity in
    /// [-2, 2] per axis and a random whole radius in [3, 6].
    pub fn emit<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) {
        self.particles.extend((0..BURST_SIZE).map(|_| Particle {
            x,
            y,
            dx: rng.random_range(-MAX_SPEED..=MAX_SPEED),
            dy: rng.random_range(-MAX_SPEED..=MAX_SPEED),
            radius: rng.random_range(3..=6) as f32,
        }));
    }

    /// Advance every particle, then drop the ones that burnt out
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
