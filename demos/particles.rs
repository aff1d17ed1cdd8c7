//! A particle system that expires particles with `retain` and keeps per-particle debug labels
//! in a `HandleMap` on the side.

use dense_registry::{handle_map::HandleMap, Handle, Registry};
use typenum::U64;

#[derive(Copy, Clone, Debug, Default)]
struct Particle {
    position: [f32; 2],
    velocity: [f32; 2],
    ttl: u32,
}

type ParticleId = Handle<Particle>;

struct Emitter {
    particles: Registry<Particle, U64>,
    labels: HandleMap<Particle, String>,
}

impl Emitter {
    fn spawn(&mut self, velocity: [f32; 2], ttl: u32) -> Option<ParticleId> {
        let particle = Particle {
            position: [0.0, 0.0],
            velocity,
            ttl,
        };
        match self.particles.try_insert(particle) {
            Ok(id) => {
                self.labels.insert(id, format!("particle ttl={}", ttl));
                Some(id)
            }
            Err(error) => {
                log::warn!("dropping spawn: {}", error);
                None
            }
        }
    }

    fn step(&mut self) {
        // The hot loop is a plain walk over contiguous storage.
        for particle in self.particles.values_mut() {
            particle.position[0] += particle.velocity[0];
            particle.position[1] += particle.velocity[1];
            particle.ttl = particle.ttl.saturating_sub(1);
        }
        self.particles.retain(|_id, particle| particle.ttl > 0);
        self.labels.vacuum(&self.particles);
    }
}

fn main() {
    env_logger::init();

    let mut emitter = Emitter {
        particles: Registry::with_capacity_type(),
        labels: HandleMap::new(),
    };
    let mut ids = Vec::new();
    for i in 0..70 {
        if let Some(id) = emitter.spawn([i as f32, 1.0], 1 + i % 5) {
            ids.push(id);
        }
    }
    println!("spawned {} of 70 particles", emitter.particles.len());

    for frame in 0..5 {
        emitter.step();
        println!(
            "frame {}: {} live, {} labels",
            frame,
            emitter.particles.len(),
            emitter.labels.len(),
        );
    }

    assert!(emitter.particles.is_empty());
    assert!(emitter.labels.is_empty());
    assert!(ids.iter().all(|&id| emitter.particles.get(id).is_none()));
}
