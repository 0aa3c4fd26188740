// pr_model: cloth state snapshot for rendering

pub struct PrParticle {
	pub pos: [f32; 2],
}

pub struct PrLink {
	pub id: usize,
	pub particles: [usize; 2],
}

pub struct PrModel {
	pub particles: Vec<PrParticle>,
	// torn links are already filtered out
	pub links: Vec<PrLink>,
}
