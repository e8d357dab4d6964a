//! Live particle set with a compile-time capacity

use heapless::Vec;

use crate::particle::Particle;

/// Particles in insertion order. Only the simulation step mutates it, once
/// per tick; the renderer only ever reads it.
pub struct ParticleStore<const N: usize> {
    particles: Vec<Particle, N>,
}

impl<const N: usize> ParticleStore<N> {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Hands the particle back when the store is full.
    pub fn push(&mut self, particle: Particle) -> Result<(), Particle> {
        self.particles.push(particle)
    }

    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Particle) -> bool,
    {
        self.particles.retain(keep);
    }

    pub fn replace(&mut self, next: Vec<Particle, N>) {
        self.particles = next;
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<const N: usize> Default for ParticleStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> IntoIterator for &'a ParticleStore<N> {
    type Item = &'a Particle;
    type IntoIter = core::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
