use crate::constraint::DistanceConstraint;
use crate::particle::Particle;
use crate::posbox::PosBox;
use crate::tear;
use crate::V2;
use protocol::pr_model::PrModel;

/// Mesh shape, fixed at construction.
#[derive(Clone)]
pub struct ClothConfig {
	pub rows: usize,
	pub cols: usize,
	pub rest_distance: f32,
	/// Top-left particle position.
	pub origin: V2,
	pub pinned_rows: Vec<usize>,
}

impl Default for ClothConfig {
	fn default() -> Self {
		Self {
			rows: 10,
			cols: 10,
			rest_distance: 30.,
			origin: V2::new(1080. / 3., 640. / 3.),
			pinned_rows: vec![0],
		}
	}
}

#[derive(Clone, Copy, PartialEq)]
pub enum Relaxation {
	/// In-place sweep in link construction order. Order-dependent but
	/// deterministic.
	GaussSeidel,
	/// Corrections computed in parallel from the pre-pass positions and
	/// applied afterwards. Converges slower per pass.
	Jacobi,
}

/// Per-step driver input.
#[derive(Clone)]
pub struct StepParams {
	pub gravity: V2,
	pub bounds: PosBox,
	pub iterations: usize,
	pub relaxation: Relaxation,
}

impl Default for StepParams {
	fn default() -> Self {
		Self {
			gravity: V2::new(0., 10.),
			bounds: PosBox::from_size(1080., 640.),
			iterations: 5,
			relaxation: Relaxation::GaussSeidel,
		}
	}
}

/// Grid of particles linked to their horizontal and vertical neighbors.
///
/// Both vecs are allocated at construction and never resized, only link
/// activity changes over the mesh lifetime.
pub struct ClothMesh {
	particles: Vec<Particle>,
	links: Vec<DistanceConstraint>,
	rows: usize,
	cols: usize,
}

impl ClothMesh {
	pub fn new(config: &ClothConfig) -> Self {
		let mut particles = Vec::with_capacity(config.rows * config.cols);
		for row in 0..config.rows {
			for col in 0..config.cols {
				let pos = config.origin
					+ V2::new(col as f32, row as f32) * config.rest_distance;
				let pinned = config.pinned_rows.contains(&row);
				particles.push(Particle::new(pos, pinned));
			}
		}
		let mut links = Vec::new();
		// per cell: horizontal link before vertical link, row-major;
		// the relaxation sweep order follows this
		for row in 0..config.rows {
			for col in 0..config.cols {
				let id = row * config.cols + col;
				if col + 1 < config.cols {
					links.push(DistanceConstraint::new(id, id + 1, &particles));
				}
				if row + 1 < config.rows {
					links.push(DistanceConstraint::new(
						id,
						id + config.cols,
						&particles,
					));
				}
			}
		}
		eprintln!(
			"INFO: cloth {}x{}, {} links",
			config.rows,
			config.cols,
			links.len()
		);
		Self {
			particles,
			links,
			rows: config.rows,
			cols: config.cols,
		}
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn index(&self, row: usize, col: usize) -> usize {
		row * self.cols + col
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn links(&self) -> &[DistanceConstraint] {
		&self.links
	}

	pub fn active_links(&self) -> impl Iterator<Item = &DistanceConstraint> {
		self.links.iter().filter(|l| l.is_active())
	}

	/// One simulation frame: accumulate the external force, integrate,
	/// clamp to bounds, then relax the links `iterations` times.
	pub fn step(&mut self, dt: f32, params: &StepParams) {
		if dt == 0f32 {
			return;
		}
		for p in self.particles.iter_mut() {
			p.apply_force(params.gravity);
			p.update(dt);
			params.bounds.apply(p.pos_mut());
		}
		for _ in 0..params.iterations {
			match params.relaxation {
				Relaxation::GaussSeidel => self.relax_in_place(),
				Relaxation::Jacobi => self.relax_buffered(),
			}
		}
	}

	fn relax_in_place(&mut self) {
		let Self {
			links, particles, ..
		} = self;
		for link in links.iter() {
			link.satisfy(particles);
		}
	}

	fn relax_buffered(&mut self) {
		use rayon::prelude::*;
		let corrections: Vec<Option<V2>> = self
			.links
			.par_iter()
			.map(|link| link.correction(&self.particles))
			.collect();
		let Self {
			links, particles, ..
		} = self;
		for (link, correction) in links.iter().zip(corrections) {
			let correction = match correction {
				Some(c) => c,
				None => continue,
			};
			let (a, b) = link.endpoints();
			if !particles[a].is_pinned() {
				particles[a].add_pos(correction);
			}
			if !particles[b].is_pinned() {
				particles[b].add_pos(-correction);
			}
		}
	}

	/// Tears the active link nearest to `query` when one lies strictly
	/// within `tolerance`. The only operation that changes topology.
	pub fn tear(&mut self, query: V2, tolerance: f32) -> bool {
		match tear::find_nearest(query, &self.links, &self.particles, tolerance)
		{
			Some(id) => {
				self.links[id].deactivate();
				true
			}
			None => false,
		}
	}

	/// Render snapshot: every particle, only the active links.
	pub fn pr_model(&self) -> PrModel {
		let particles = self.particles.iter().map(|p| p.render()).collect();
		let links = self
			.links
			.iter()
			.enumerate()
			.filter(|(_, l)| l.is_active())
			.map(|(id, l)| l.render(id))
			.collect();
		PrModel { particles, links }
	}
}
