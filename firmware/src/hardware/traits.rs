pub trait Buzzer {
    /// Sound a continuous tone at `hz` until muted or retuned.
    fn play(&mut self, hz: u32);

    /// Silence the output, leaving the tone generator configured.
    fn mute(&mut self);
}
