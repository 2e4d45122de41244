//! RP2040 clock and power adapters

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use defmt::*;
use embassy_rp::clocks::clk_sys_freq;
use embassy_time::{block_for, Duration, Instant};
use pirtherm_core::traits::{Clock, PowerController, PowerError, Radio};

/// Millisecond clock on the embassy time driver
///
/// The 64-bit tick count is truncated to `u32`; the core's interval math
/// handles the wrap.
pub struct RpClock;

impl Clock for RpClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}

/// Power controls for an RP2040 board
///
/// The system clock is fixed by `embassy_rp::init`, so `set_clock_speed`
/// only confirms it. There is no radio on the chip. Suspends sleep in WFI,
/// woken once per millisecond by SysTick.
pub struct RpPower {
    syst: Option<SYST>,
}

impl RpPower {
    /// Create the controller; without SysTick, suspends are unsupported
    pub fn new(syst: Option<SYST>) -> Self {
        Self { syst }
    }
}

impl PowerController for RpPower {
    fn set_clock_speed(&mut self, hz: u32) -> Result<(), PowerError> {
        let actual = clk_sys_freq();
        if actual == hz {
            Ok(())
        } else {
            debug!("clk_sys is {=u32} Hz, requested {=u32} Hz", actual, hz);
            Err(PowerError::Unsupported)
        }
    }

    fn disable_radio(&mut self, _radio: Radio) -> Result<(), PowerError> {
        Err(PowerError::Unsupported)
    }

    fn suspend_for(&mut self, ms: u32) -> Result<(), PowerError> {
        let syst = self.syst.as_mut().ok_or(PowerError::Unsupported)?;

        // 1 ms tick
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(clk_sys_freq() / 1000 - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();

        let deadline = Instant::now() + Duration::from_millis(ms as u64);
        while Instant::now() < deadline {
            cortex_m::asm::wfi();
        }

        // Keep SysTick quiet outside suspends so it cannot disturb bus timing
        syst.disable_interrupt();
        syst.disable_counter();
        Ok(())
    }
}
