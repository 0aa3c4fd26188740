//! Nearest-link lookup for interactive tearing.
//!
//! Search and mutation are split in two phases: `find_nearest` only reads
//! the mesh and returns an index, the caller deactivates through it
//! afterwards (see `ClothMesh::tear`).

use crate::constraint::DistanceConstraint;
use crate::particle::Particle;
use crate::V2;

/// Distance from `p` to the segment `a`-`b` (projection clamped to the
/// segment). A zero-length segment degenerates to point distance.
pub fn point_to_segment_distance(p: V2, a: V2, b: V2) -> f32 {
	let ab = b - a;
	let ab2 = ab.dot(&ab);
	if !ab2.is_normal() {
		return (p - a).magnitude();
	}
	let t = ((p - a).dot(&ab) / ab2).clamp(0., 1.);
	(p - (a + ab * t)).magnitude()
}

/// Index of the active link nearest to `query`, if strictly closer than
/// `tolerance`. Ties go to the first link in container order.
pub fn find_nearest(
	query: V2,
	links: &[DistanceConstraint],
	particles: &[Particle],
	tolerance: f32,
) -> Option<usize> {
	let mut nearest = None;
	let mut min_distance = tolerance;
	for (id, link) in links.iter().enumerate() {
		if !link.is_active() {
			continue;
		}
		let (a, b) = link.endpoints();
		let distance = point_to_segment_distance(
			query,
			particles[a].get_pos(),
			particles[b].get_pos(),
		);
		if distance < min_distance {
			min_distance = distance;
			nearest = Some(id);
		}
	}
	nearest
}
