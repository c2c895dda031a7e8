//! STM32F103 Blue Pill Rotary-Encoder Bouncing Ball
//! =============================================================================================
//!
//! This firmware bounces a filled ball around an SSD1306 OLED, with the
//! ball's speed set by a quadrature rotary encoder. A passive piezo buzzer
//! plays Happy Birthday once at power-up while the animation runs.
//!
//! Hardware Connections:
//!   OLED Display -> Blue Pill
//!      GND  -> GND
//!      VCC  -> 5V
//!      SDA  -> PB7
//!      SCL  -> PB6
//!
//!   Rotary Encoder (both lines idle high via internal pull-ups):
//!      A    -> PA0 (EXTI0)
//!      B    -> PA1 (EXTI1)
//!      COM  -> GND
//!
//!   Piezo Buzzer:
//!      +    -> PA8 (TIM1_CH1)
//!      -    -> GND
//!
//! Behavior:
//! 1. Turning the encoder clockwise speeds the ball up, counter-clockwise
//!    slows it and then reverses it; the center position parks it
//! 2. Every observed position change is reported over defmt RTT as
//!    "Encoder position: <value>"
//! 3. The melody plays to completion exactly once and never repeats
//! 4. Onboard LED (PC13) blinks as a liveness indicator

#![no_std]
#![no_main]

use core::cell::RefCell;
use core::sync::atomic::{AtomicU8, Ordering};

use bounce_core::ball::{Ball, BALL_RADIUS};
use bounce_core::encoder::{EncoderState, Line, POSITION_CENTER};
use bounce_core::melody::{BIRTHDAY, TEMPO_UNIT_MS};
use defmt::{debug, info};
use defmt_rtt as _; // Global logger
use embassy_executor::Spawner;
use embassy_stm32::{
    bind_interrupts,
    exti::ExtiInput,
    gpio::{Level, Output, OutputType, Pull, Speed},
    i2c::{self, ErrorInterruptHandler, EventInterruptHandler},
    mode::Async,
    peripherals,
    time::Hertz,
    timer::simple_pwm::{PwmPin, SimplePwm},
};
use embassy_sync::blocking_mutex::{raw::ThreadModeRawMutex, Mutex};
use embassy_time::{Duration, Ticker, Timer};
use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
};
use firmware::hardware::{pwm_buzzer::PwmBuzzer, traits::Buzzer};
use panic_probe as _; // Panic handler
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};

/// Debounced line levels, settle gate, and saturating position. The two
/// line tasks and the animation task only ever hold the lock for a single
/// operation, never across an await.
static ENCODER: Mutex<ThreadModeRawMutex, RefCell<EncoderState>> =
    Mutex::new(RefCell::new(EncoderState::new()));

/// Lock-free mirror of the position for the animation task's per-frame read.
static POSITION: AtomicU8 = AtomicU8::new(POSITION_CENTER);

/// How long a line is given to stop bouncing before it is re-sampled.
const SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Display refresh cadence; one ball step per refresh.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Encoder Line Task (one instance per line)
///
/// Responsibilities:
/// 1. Wake on every edge of its line
/// 2. Wait out the settle delay while the shared gate is armed
/// 3. Re-sample the line and feed the debounced level into the tracker
/// 4. Publish the resulting position for the animation task
#[embassy_executor::task(pool_size = 2)]
async fn encoder_line(mut pin: ExtiInput<'static>, line: Line) {
    loop {
        pin.wait_for_any_edge().await;

        // The settle sleep stays outside the lock: a genuine event on the
        // other line may clear the gate meanwhile and skip its own wait.
        // That relaxed handoff is the intended debounce behavior for a
        // low-speed mechanical encoder.
        let settle = ENCODER.lock(|enc| enc.borrow().needs_settle());
        if settle {
            Timer::after(SETTLE_DELAY).await;
        }

        // Levels that did not survive the settle delay are bounce artifacts
        // and are dropped inside `edge`.
        let level = pin.is_high();
        let reported = ENCODER.lock(|enc| enc.borrow_mut().edge(line, level));

        if let Some(position) = reported {
            POSITION.store(position, Ordering::Relaxed);
        }
    }
}

/// Animation Task
///
/// Responsibilities:
/// 1. Re-arm the encoder settle gate once per frame
/// 2. Report encoder position changes over RTT
/// 3. Advance the ball and reflect it off the panel edges
/// 4. Redraw the full frame and push it to the panel
#[embassy_executor::task]
async fn animation(i2c: i2c::I2c<'static, Async>, refresh: Duration) {
    let mut ticker = Ticker::every(refresh);

    // Initialize display interface and controller (I2C address 0x3C)
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    display.init().unwrap();

    let ball_style = PrimitiveStyle::with_fill(BinaryColor::On);
    let mut ball = Ball::new();
    let mut last_reported: Option<u8> = None;

    loop {
        // Keep the debounce gate armed; an edge burst in the coming frame
        // will wait out the settle delay again.
        ENCODER.lock(|enc| enc.borrow_mut().arm_debounce());

        let position = POSITION.load(Ordering::Relaxed);
        if last_reported != Some(position) {
            info!("Encoder position: {}", position);
            last_reported = Some(position);
        }

        ball.step(position);

        // Full clear-and-redraw every frame, no partial updates
        display.clear_buffer();
        Circle::with_center(
            Point::new(ball.x, ball.y),
            (BALL_RADIUS * 2 + 1) as u32,
        )
        .into_styled(ball_style)
        .draw(&mut display)
        .unwrap();
        display.flush().unwrap();

        ticker.next().await;
    }
}

/// Melody Task
///
/// Responsibilities:
/// 1. Play the boot tune once, entry by entry
/// 2. Hold each pitch (or rest) for its note length, then one tempo unit
///    of silence as the inter-note gap
/// 3. Leave the buzzer muted and finish; the task never restarts
#[embassy_executor::task]
async fn play_melody(mut buzzer: PwmBuzzer<'static, peripherals::TIM1>) {
    debug!("melody: starting playback");

    for note in &BIRTHDAY {
        match note.pitch.frequency_hz() {
            Some(hz) => {
                buzzer.play(hz);
                Timer::after_millis(note.hold_ms()).await;
                buzzer.mute();
            }
            None => {
                Timer::after_millis(note.hold_ms()).await;
            }
        }

        // Inter-note gap
        Timer::after_millis(TEMPO_UNIT_MS).await;
    }

    debug!("melody: done");
}

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize peripherals with default configuration
    let p = embassy_stm32::init(Default::default());

    // Bind I2C interrupt handlers
    bind_interrupts!(struct Irqs {
        I2C1_EV => EventInterruptHandler<peripherals::I2C1>;
        I2C1_ER => ErrorInterruptHandler<peripherals::I2C1>;
    });

    // Configure I2C peripheral at 400kHz for the OLED
    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH7,
        Hertz::khz(400),
        Default::default(),
    );

    // Encoder lines on EXTI, idle high, interrupting on both edges
    let line_a = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    let line_b = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up);

    // Buzzer PWM on TIM1 channel 1; the frequency is retuned per note
    let pwm = SimplePwm::new(
        p.TIM1,
        Some(PwmPin::new_ch1(p.PA8, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz::hz(440),
        Default::default(),
    );

    spawner.spawn(encoder_line(line_a, Line::A)).unwrap();
    spawner.spawn(encoder_line(line_b, Line::B)).unwrap();
    spawner.spawn(animation(i2c, FRAME_INTERVAL)).unwrap();
    spawner.spawn(play_melody(PwmBuzzer::new(pwm))).unwrap();

    // Configure onboard LED (PC13) as heartbeat indicator
    let mut led = Output::new(p.PC13, Level::High, Speed::Low);
    let mut ticker = Ticker::every(Duration::from_millis(500));

    // Main heartbeat loop - blinks onboard LED
    loop {
        led.set_low(); // LED on
        ticker.next().await;
        led.set_high(); // LED off
        ticker.next().await;
    }
}
