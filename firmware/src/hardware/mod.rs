pub mod pwm_buzzer;
pub mod traits;
