//! Counts from 0.0 to 9.9 in steps of 0.1 on two Pixie displays, bit-banged from a Raspberry Pi.
//!
//! Wiring: DAT to BCM GPIO 17 (WiringPi 0, header pin 11), CLK to BCM GPIO 27 (WiringPi 2,
//! header pin 13), VCC to header pin 2 and GND to header pin 6.
//!
//! Build with `linux-embedded-hal` 0.3 and `env_logger`, and run with `RUST_LOG=debug` to see the
//! driver's log output.

extern crate env_logger;
extern crate linux_embedded_hal as linux_hal;
extern crate pixie;

use linux_hal::{Delay, Direction, Pin};
use pixie::{BitBangInterface, Pixie};

const DAT_PIN: u64 = 17;
const CLK_PIN: u64 = 27;

fn output(num: u64) -> Result<Pin, linux_hal::sysfs_gpio::Error> {
    let pin = Pin::new(num);
    pin.export()?;
    pin.set_direction(Direction::Low)?;
    Ok(pin)
}

fn main() -> Result<(), linux_hal::sysfs_gpio::Error> {
    env_logger::init();

    let iface = BitBangInterface::new(output(DAT_PIN)?, output(CLK_PIN)?, Delay);
    let mut pix = Pixie::<_, 2>::new(iface);
    pix.begin()?;

    for i in 0..100 {
        pix.clear();
        pix.write_float(i as f32 / 10.0, 1, 0);
        pix.show()?;
    }
    Ok(())
}
