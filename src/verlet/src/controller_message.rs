pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	Tear([f32; 2]),
}
