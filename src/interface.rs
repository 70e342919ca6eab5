//! The transports which carry a frame buffer out to the chain of displays.

/// Time the clock line is held high to reset the chain.
pub const RESET_HIGH_MS: u16 = 15;
/// Time the clock line is held low after a reset before the chain accepts data.
pub const RESET_LOW_MS: u16 = 10;
/// Default pause after a frame, during which the displays latch what was clocked in.
pub const DEFAULT_LATCH_MS: u16 = 5;

pub trait PixieInterface {
    type Error;

    /// Put every display in the chain back into its power-on state, ready to receive a frame.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Clock out a complete frame, first byte first and most significant bit first, and wait for
    /// the chain to latch it.
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

pub mod bitbang {
    //! Drives the chain by toggling two GPIO outputs, one for data and one for clock. This works
    //! on any pair of pins, at the cost of keeping the CPU busy for the whole frame.

    use hal::blocking::delay::{DelayMs, DelayUs};
    use hal::digital::v2::OutputPin;
    use itertools::iproduct;

    use super::{PixieInterface, DEFAULT_LATCH_MS, RESET_HIGH_MS, RESET_LOW_MS};

    /// Default half period of the bit clock.
    pub const DEFAULT_CLOCK_US: u16 = 12;

    pub struct BitBangInterface<DAT, CLK, D> {
        /// GPIO output connected to the DAT input of the first display.
        data: DAT,
        /// GPIO output connected to the CLK input of the first display.
        clock: CLK,
        delay: D,
        clock_us: u16,
        latch_ms: u16,
    }

    impl<DAT, CLK, D, E> BitBangInterface<DAT, CLK, D>
    where
        DAT: OutputPin<Error = E>,
        CLK: OutputPin<Error = E>,
        D: DelayUs<u16> + DelayMs<u16>,
    {
        /// Create a new bit-banged interface. `data` and `clock` are the GPIO outputs wired to the
        /// first display's DAT and CLK inputs, and `delay` paces the clock.
        pub fn new(data: DAT, clock: CLK, delay: D) -> Self {
            Self {
                data,
                clock,
                delay,
                clock_us: DEFAULT_CLOCK_US,
                latch_ms: DEFAULT_LATCH_MS,
            }
        }

        /// Override the half period of the bit clock. Long cable runs may need a slower clock.
        pub fn clock_period_us(self, clock_us: u16) -> Self {
            Self { clock_us, ..self }
        }

        /// Override the pause after each frame.
        pub fn latch_ms(self, latch_ms: u16) -> Self {
            Self { latch_ms, ..self }
        }

        /// Give back the pins and the delay.
        pub fn release(self) -> (DAT, CLK, D) {
            (self.data, self.clock, self.delay)
        }
    }

    impl<DAT, CLK, D, E> PixieInterface for BitBangInterface<DAT, CLK, D>
    where
        DAT: OutputPin<Error = E>,
        CLK: OutputPin<Error = E>,
        D: DelayUs<u16> + DelayMs<u16>,
    {
        type Error = E;

        fn reset(&mut self) -> Result<(), E> {
            self.clock.set_high()?;
            self.delay.delay_ms(RESET_HIGH_MS);
            self.clock.set_low()?;
            self.delay.delay_ms(RESET_LOW_MS);
            Ok(())
        }

        fn send_frame(&mut self, frame: &[u8]) -> Result<(), E> {
            for (byte, bit) in iproduct!(frame.iter(), (0..8u8).rev()) {
                if *byte & (1 << bit) != 0 {
                    self.data.set_high()?;
                } else {
                    self.data.set_low()?;
                }
                self.clock.set_high()?;
                self.delay.delay_us(self.clock_us);
                self.clock.set_low()?;
                self.delay.delay_us(self.clock_us);

                // Byte gap.
                if bit == 0 {
                    self.delay.delay_us(self.clock_us);
                }
            }
            self.delay.delay_ms(self.latch_ms);
            Ok(())
        }
    }

}

pub mod spi {
    //! Drives the chain from a hardware SPI master, with the SPI clock wired to CLK and MOSI
    //! wired to DAT. The frame goes out in a single blocking transfer. SPI mode 0 is expected.

    use hal::blocking::delay::DelayMs;
    use hal::blocking::spi::Write;

    use super::{PixieInterface, DEFAULT_LATCH_MS, RESET_HIGH_MS, RESET_LOW_MS};

    pub struct SpiInterface<SPI, D> {
        /// The SPI master connected to the chain.
        spi: SPI,
        delay: D,
        latch_ms: u16,
    }

    impl<SPI, D> SpiInterface<SPI, D>
    where
        SPI: Write<u8>,
        D: DelayMs<u16>,
    {
        /// Create a new SPI interface. `spi` is the SPI master and `delay` times the latch pause.
        pub fn new(spi: SPI, delay: D) -> Self {
            Self {
                spi,
                delay,
                latch_ms: DEFAULT_LATCH_MS,
            }
        }

        /// Override the pause after each frame.
        pub fn latch_ms(self, latch_ms: u16) -> Self {
            Self { latch_ms, ..self }
        }

        /// Give back the SPI master and the delay.
        pub fn release(self) -> (SPI, D) {
            (self.spi, self.delay)
        }
    }

    impl<SPI, D> PixieInterface for SpiInterface<SPI, D>
    where
        SPI: Write<u8>,
        D: DelayMs<u16>,
    {
        type Error = SPI::Error;

        /// An SPI master cannot hold its clock line high, so the bus is left idle for the whole
        /// reset period instead, which the displays treat as the end of any partial frame.
        fn reset(&mut self) -> Result<(), Self::Error> {
            self.delay.delay_ms(RESET_HIGH_MS + RESET_LOW_MS);
            Ok(())
        }

        fn send_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
            self.spi.write(frame)?;
            self.delay.delay_ms(self.latch_ms);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::vec::Vec;

        #[derive(Default)]
        struct SpySpi {
            written: Vec<Vec<u8>>,
            fail: bool,
        }

        impl Write<u8> for SpySpi {
            type Error = &'static str;
            fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
                if self.fail {
                    return Err("bus fault");
                }
                self.written.push(words.to_vec());
                Ok(())
            }
        }

        #[derive(Default)]
        struct SpyDelay(Vec<u16>);

        impl DelayMs<u16> for SpyDelay {
            fn delay_ms(&mut self, ms: u16) {
                self.0.push(ms);
            }
        }

        #[test]
        fn frame_in_one_transfer() {
            let mut iface = SpiInterface::new(SpySpi::default(), SpyDelay::default());
            iface.send_frame(&[0, 255, 0, 1, 2, 3, 4, 5]).unwrap();
            let (spi, delay) = iface.release();
            assert_eq!(spi.written, [vec![0, 255, 0, 1, 2, 3, 4, 5]]);
            assert_eq!(delay.0, [5]);
        }

        #[test]
        fn reset_idles_bus() {
            let mut iface = SpiInterface::new(SpySpi::default(), SpyDelay::default()).latch_ms(2);
            iface.reset().unwrap();
            iface.send_frame(&[1]).unwrap();
            let (spi, delay) = iface.release();
            assert_eq!(spi.written.len(), 1);
            assert_eq!(delay.0, [25, 2]);
        }

        #[test]
        fn bus_errors_propagate() {
            let spi = SpySpi {
                fail: true,
                ..SpySpi::default()
            };
            let mut iface = SpiInterface::new(spi, SpyDelay::default());
            assert_eq!(iface.send_frame(&[1]), Err("bus fault"));
            let (_, delay) = iface.release();
            assert!(delay.0.is_empty());
        }
    }
}
