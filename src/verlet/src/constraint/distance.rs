use crate::particle::Particle;
use crate::V2;
use protocol::pr_model::PrLink;

/// Distance constraint between two particles of the mesh.
///
/// Endpoints are indices into the mesh's particle vec, which is allocated
/// once and never resized, so the indices stay valid for the mesh lifetime.
#[derive(Clone)]
pub struct DistanceConstraint {
	a: usize,
	b: usize,
	l0: f32,
	active: bool,
}

impl DistanceConstraint {
	/// Links two particles, recording their current separation as the
	/// rest length.
	pub fn new(a: usize, b: usize, particles: &[Particle]) -> Self {
		let l0 = (particles[b].get_pos() - particles[a].get_pos()).magnitude();
		Self::new_with_l0(a, b, l0)
	}

	pub fn new_with_l0(a: usize, b: usize, l0: f32) -> Self {
		Self {
			a,
			b,
			l0,
			active: true,
		}
	}

	pub fn endpoints(&self) -> (usize, usize) {
		(self.a, self.b)
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Permanently tears the constraint. Idempotent.
	pub fn deactivate(&mut self) {
		self.active = false;
	}

	/// Half of the position error along the segment, to add to `a` and
	/// subtract from `b`. None when inactive or when the live length is
	/// degenerate (coincident endpoints, or NaN already leaked in), in
	/// which case no correction is safe to compute.
	pub fn correction(&self, particles: &[Particle]) -> Option<V2> {
		if !self.active {
			return None;
		}
		let delta = particles[self.b].get_pos() - particles[self.a].get_pos();
		let l = delta.magnitude();
		if !l.is_normal() {
			return None;
		}
		let diff = (l - self.l0) / l;
		Some(delta * 0.5 * diff)
	}

	/// Moves each unpinned endpoint half the distance needed to restore
	/// the rest length. One call does not fully satisfy an interconnected
	/// mesh, the solver runs several passes per frame.
	pub fn satisfy(&self, particles: &mut [Particle]) {
		if !self.active {
			return;
		}
		let delta = particles[self.b].get_pos() - particles[self.a].get_pos();
		let l = delta.magnitude();
		if !l.is_normal() {
			// coincident endpoints are expected after a hard clamp,
			// anything non-finite means an upstream bug
			if !l.is_finite() {
				eprintln!("WARN: bad distance {}", l);
			}
			return;
		}
		let diff = (l - self.l0) / l;
		let correction = delta * 0.5 * diff;
		if !particles[self.a].is_pinned() {
			particles[self.a].add_pos(correction);
		}
		if !particles[self.b].is_pinned() {
			particles[self.b].add_pos(-correction);
		}
	}

	pub fn render(&self, id: usize) -> PrLink {
		PrLink {
			id,
			particles: [self.a, self.b],
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn pair(pa: V2, pb: V2, pinned_a: bool, pinned_b: bool) -> Vec<Particle> {
		vec![Particle::new(pa, pinned_a), Particle::new(pb, pinned_b)]
	}

	fn length(ps: &[Particle]) -> f32 {
		(ps[1].get_pos() - ps[0].get_pos()).magnitude()
	}

	#[test]
	fn test_satisfy_converges_to_rest_length() {
		let mut ps = pair(V2::new(0., 0.), V2::new(10., 0.), false, false);
		let c = DistanceConstraint::new_with_l0(0, 1, 4.);
		let mut prev_err = (length(&ps) - 4.).abs();
		for _ in 0..50 {
			c.satisfy(&mut ps);
			let err = (length(&ps) - 4.).abs();
			assert!(err <= prev_err);
			prev_err = err;
		}
		assert!(prev_err < 1e-4);
	}

	#[test]
	fn test_satisfy_converges_with_pinned_endpoint() {
		let mut ps = pair(V2::new(0., 0.), V2::new(10., 0.), true, false);
		let c = DistanceConstraint::new_with_l0(0, 1, 4.);
		for _ in 0..50 {
			c.satisfy(&mut ps);
		}
		assert_eq!(ps[0].get_pos(), V2::new(0., 0.));
		assert!((length(&ps) - 4.).abs() < 1e-4);
	}

	#[test]
	fn test_new_records_current_separation() {
		let ps = pair(V2::new(1., 2.), V2::new(4., 6.), false, false);
		let c = DistanceConstraint::new(0, 1, &ps);
		assert!((c.rest_length() - 5.).abs() < 1e-6);
	}

	#[test]
	fn test_deactivated_constraint_is_inert() {
		let mut ps = pair(V2::new(0., 0.), V2::new(10., 0.), false, false);
		let mut c = DistanceConstraint::new_with_l0(0, 1, 4.);
		c.deactivate();
		c.deactivate(); // idempotent
		c.satisfy(&mut ps);
		assert_eq!(ps[0].get_pos(), V2::new(0., 0.));
		assert_eq!(ps[1].get_pos(), V2::new(10., 0.));
		assert!(!c.is_active());
	}

	#[test]
	fn test_coincident_endpoints_skip_correction() {
		let mut ps = pair(V2::new(3., 3.), V2::new(3., 3.), false, false);
		let c = DistanceConstraint::new_with_l0(0, 1, 5.);
		c.satisfy(&mut ps);
		// no NaN leaks, positions untouched
		assert_eq!(ps[0].get_pos(), V2::new(3., 3.));
		assert_eq!(ps[1].get_pos(), V2::new(3., 3.));
	}

	#[test]
	fn test_satisfied_constraint_is_stable() {
		let mut ps = pair(V2::new(0., 0.), V2::new(30., 0.), false, false);
		let c = DistanceConstraint::new(0, 1, &ps);
		c.satisfy(&mut ps);
		assert_eq!(ps[0].get_pos(), V2::new(0., 0.));
		assert_eq!(ps[1].get_pos(), V2::new(30., 0.));
	}
}
