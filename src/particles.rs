//! Ambient constellation background.
//!
//! [`Simulation`] owns the particle pool, the viewport and the random source.
//! The browser side drives it once per animation frame and draws whatever it
//! reports; nothing here touches the canvas.

use fastrand::Rng;

/// Particles closer than this are joined by a line.
pub const LINK_DISTANCE: f64 = 120.0;
/// Peak opacity of a link, reached as the distance approaches zero.
pub const LINK_ALPHA: f64 = 0.25;
/// How far past the viewport a particle may drift before it respawns.
pub const EDGE_MARGIN: f64 = 20.0;
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

const RADIUS_MIN: f64 = 0.8;
const RADIUS_SPAN: f64 = 3.0;
const SPEED_SPAN: f64 = 0.35;
const ALPHA_MIN: f64 = 0.3;
const ALPHA_SPAN: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pool size for this viewport width.
    pub fn particle_count(&self) -> usize {
        if self.width < 640.0 {
            50
        } else if self.width < 1024.0 {
            80
        } else {
            120
        }
    }

    fn escaped(&self, x: f64, y: f64) -> bool {
        x < -EDGE_MARGIN
            || x > self.width + EDGE_MARGIN
            || y < -EDGE_MARGIN
            || y > self.height + EDGE_MARGIN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
}

impl Particle {
    fn spawn(rng: &mut Rng, viewport: Viewport) -> Self {
        Self {
            x: rng.f64() * viewport.width,
            y: rng.f64() * viewport.height,
            radius: rng.f64() * RADIUS_SPAN + RADIUS_MIN,
            vx: (rng.f64() - 0.5) * SPEED_SPAN,
            vy: (rng.f64() - 0.5) * SPEED_SPAN,
            alpha: rng.f64() * ALPHA_SPAN + ALPHA_MIN,
        }
    }
}

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
}

/// Opacity of the line joining two particles `distance` apart. Zero at or
/// beyond [`LINK_DISTANCE`], linear up to [`LINK_ALPHA`] towards zero.
pub fn link_alpha(distance: f64) -> f64 {
    if distance >= LINK_DISTANCE {
        0.0
    } else {
        (1.0 - distance / LINK_DISTANCE) * LINK_ALPHA
    }
}

pub struct Simulation {
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: Rng,
}

impl Simulation {
    /// Fill a pool sized for `viewport` with freshly spawned particles.
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let particles = (0..viewport.particle_count())
            .map(|_| Particle::spawn(&mut rng, viewport))
            .collect();
        Self {
            viewport,
            particles,
            rng,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Advance every particle one frame, respawning the ones that left the
    /// inflated viewport.
    pub fn step(&mut self) {
        let viewport = self.viewport;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if viewport.escaped(p.x, p.y) {
                *p = Particle::spawn(&mut self.rng, viewport);
            }
        }
    }

    /// Rescale positions to the new viewport and resize the pool when the
    /// breakpoint count changed. Surviving particles keep their relative
    /// layout.
    pub fn resize(&mut self, viewport: Viewport) {
        let old = self.viewport;
        if old.width > 0.0 && old.height > 0.0 {
            let sx = viewport.width / old.width;
            let sy = viewport.height / old.height;
            for p in &mut self.particles {
                p.x *= sx;
                p.y *= sy;
            }
        }
        self.viewport = viewport;

        let target = viewport.particle_count();
        if target < self.particles.len() {
            self.particles.truncate(target);
        }
        while self.particles.len() < target {
            self.particles.push(Particle::spawn(&mut self.rng, viewport));
        }
    }

    /// Every pair closer than [`LINK_DISTANCE`]. Quadratic in the pool size.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < LINK_DISTANCE {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        alpha: link_alpha(distance),
                    });
                }
            }
        }
        links
    }
}
