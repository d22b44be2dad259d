//! Full example code for driving an LED dot matrix breakout. This runs on an STM32F303RE, with the
//! breakout on I2C1 (PB6 = SCL, PB7 = SDA) at its default address. The main loop stands in for a
//! scheduler and ticks the controller at the configured update interval.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate ltp305;
extern crate panic_abort;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::i2c::I2c;
use hal::prelude::*;
use hal_api::blocking::delay::DelayMs;
use ltp305::{Config, Controller, Display, FrameBuffer, PixelSurface, Pollable};

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // I2C1 is Alternate Function 4 for PB6 and PB7.
    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let scl = gpiob.pb6.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let sda = gpiob.pb7.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let i2c = I2c::i2c1(dp.I2C1, (scl, sda), 400.khz(), clocks, &mut rcc.apb1);

    // Count 00-99 on the two modules, blinking the right decimal dot every other tick.
    let mut count = 0u32;
    let mut ctrl = Controller::with_writer(
        Display::new_i2c(i2c, Config::new().brightness(32)),
        move |buf: &mut FrameBuffer| {
            buf.draw_fmt(format_args!("{:02}", count % 100));
            buf.set_decimal_dot(None, Some(count % 2 == 0));
            count += 1;
        },
    );

    let interval_ms = ctrl.update_interval().as_millis() as u32;

    if ctrl.setup().is_err() {
        // Nothing is attached at the default address. The controller will ignore ticks.
        asm::bkpt();
    }

    loop {
        ctrl.update();
        delay.delay_ms(interval_ms);
    }
}
