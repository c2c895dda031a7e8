use super::traits::Buzzer;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::GeneralInstance4Channel;
use embassy_stm32::timer::simple_pwm::SimplePwm;

/// Passive piezo driven from a timer's channel 1 at 50% duty.
///
/// Pitch changes retune the whole timer, so the buzzer owns the timer and no
/// other channel can share it.
pub struct PwmBuzzer<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> PwmBuzzer<'d, T> {
    pub fn new(pwm: SimplePwm<'d, T>) -> Self {
        let mut buzzer = Self { pwm };
        buzzer.mute();
        buzzer.pwm.ch1().enable();
        buzzer
    }
}

impl<'d, T: GeneralInstance4Channel> Buzzer for PwmBuzzer<'d, T> {
    fn play(&mut self, hz: u32) {
        // Retune first; the duty range depends on the period.
        self.pwm.set_frequency(Hertz::hz(hz));
        self.pwm.ch1().set_duty_cycle_percent(50);
    }

    fn mute(&mut self) {
        self.pwm.ch1().set_duty_cycle_fully_off();
    }
}
