use crate::V2;
use protocol::pr_model::PrParticle;

/// A point mass of the cloth. No explicit velocity is stored,
/// it is implied by pos - ppos (Verlet integration).
#[derive(Clone)]
pub struct Particle {
	pos: V2,
	ppos: V2,
	accel: V2,
	pinned: bool,
}

impl Particle {
	pub fn new(pos: V2, pinned: bool) -> Self {
		Self {
			pos,
			ppos: pos,
			accel: V2::new(0., 0.),
			pinned,
		}
	}

	pub fn get_pos(&self) -> V2 {
		self.pos
	}

	pub fn is_pinned(&self) -> bool {
		self.pinned
	}

	pub fn add_pos(&mut self, dp: V2) {
		self.pos += dp
	}

	pub fn pos_mut(&mut self) -> &mut V2 {
		&mut self.pos
	}

	pub fn apply_force(&mut self, f: V2) {
		if self.pinned {
			return;
		}
		self.accel += f;
	}

	pub fn update(&mut self, dt: f32) {
		if self.pinned {
			return;
		}
		let velocity = self.pos - self.ppos;
		self.ppos = self.pos;
		self.pos += velocity + self.accel * dt * dt;
		self.accel = V2::new(0., 0.);
	}

	pub fn render(&self) -> PrParticle {
		PrParticle {
			pos: [self.pos[0], self.pos[1]],
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_pinned_never_moves() {
		let mut p = Particle::new(V2::new(3., 4.), true);
		p.apply_force(V2::new(0., 100.));
		p.update(0.1);
		assert_eq!(p.get_pos(), V2::new(3., 4.));
	}

	#[test]
	fn test_update_applies_force_once() {
		let mut p = Particle::new(V2::new(0., 0.), false);
		p.apply_force(V2::new(0., 10.));
		p.update(0.1);
		// starts at rest, so dp = accel * dt^2
		assert!((p.get_pos() - V2::new(0., 0.1)).magnitude() < 1e-6);
		// force was reset, second update is pure inertia
		p.update(0.1);
		assert!((p.get_pos() - V2::new(0., 0.2)).magnitude() < 1e-6);
	}

	#[test]
	fn test_implicit_velocity_survives_correction() {
		let mut p = Particle::new(V2::new(0., 0.), false);
		p.apply_force(V2::new(1., 0.));
		p.update(1.);
		// external position correction, as a constraint pass would do
		p.add_pos(V2::new(0.5, 0.));
		let before = p.get_pos();
		p.update(1.);
		// velocity estimate includes the correction, no desync
		let velocity = p.get_pos() - before;
		assert!((velocity - V2::new(1.5, 0.)).magnitude() < 1e-6);
	}
}
