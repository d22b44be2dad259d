use crate::error::Error;

/// Register-level access to the IS31FL3730. Every transaction addresses one register; multi-byte
/// writes rely on the chip auto-incrementing within the addressed matrix buffer.
pub trait RegisterInterface {
    /// Issue an empty transaction to check that the device acknowledges its address.
    fn probe(&mut self) -> Result<(), Error>;
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error>;
    fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<(), Error>;
}

pub mod i2c {
    //! The IS31FL3730 only speaks I2C. A register write is a single bus write whose first byte is
    //! the register address, followed by the data bytes.

    use super::RegisterInterface;
    use crate::error::Error;

    /// Largest payload sent in one transaction: a full 8-byte matrix buffer.
    const MAX_PAYLOAD: usize = 8;

    pub struct I2cInterface<I2C> {
        /// The I2C master device connected to the IS31FL3730.
        i2c: I2C,
        /// The 7-bit device address, selected by the address jumpers on the breakout.
        address: u8,
    }

    impl<I2C> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        /// Create a new I2C interface to communicate with the driver chip at `address`.
        pub fn new(i2c: I2C, address: u8) -> Self {
            Self { i2c, address }
        }

        pub fn address(&self) -> u8 {
            self.address
        }

        /// Give back the bus.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C> RegisterInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        fn probe(&mut self) -> Result<(), Error> {
            self.i2c
                .write(self.address, &[])
                .map_err(|_| Error::Communication)
        }

        fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
            self.i2c
                .write(self.address, &[reg, value])
                .map_err(|_| Error::Communication)
        }

        fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
            if data.len() > MAX_PAYLOAD {
                return Err(Error::InvalidArgument);
            }
            let mut buf = [0u8; MAX_PAYLOAD + 1];
            buf[0] = reg;
            buf[1..=data.len()].copy_from_slice(data);
            self.i2c
                .write(self.address, &buf[..=data.len()])
                .map_err(|_| Error::Communication)
        }
    }
}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    use super::RegisterInterface;
    use crate::error::Error;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Probe,
        Write(u8, Vec<u8>),
    }

    /// Spy whose log is shared between clones, so a test can keep one half after handing the
    /// other to a `Display`.
    #[derive(Clone)]
    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
        probe_fails: bool,
        failing_register: Rc<Cell<Option<u8>>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
                probe_fails: false,
                failing_register: Rc::new(Cell::new(None)),
            }
        }
        /// A spy whose probe reports a bus failure.
        pub fn unresponsive() -> Self {
            TestSpyInterface {
                probe_fails: true,
                ..Self::new()
            }
        }
        /// Record writes to `reg` as usual but report them as bus failures.
        pub fn fail_writes_to(&self, reg: u8) {
            self.failing_register.set(Some(reg));
        }
        fn result_for(&self, reg: u8) -> Result<(), Error> {
            if self.failing_register.get() == Some(reg) {
                Err(Error::Communication)
            } else {
                Ok(())
            }
        }
        pub fn split(&self) -> Self {
            self.clone()
        }
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }
        pub fn check(&self, reg: u8, data: &[u8]) {
            assert_eq!(self.sent.borrow().last(), Some(&Sent::Write(reg, data.to_vec())));
        }
        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(&self.sent.borrow()[..], expect);
        }
        pub fn clear(&self) {
            self.sent.borrow_mut().clear()
        }
    }

    impl RegisterInterface for TestSpyInterface {
        fn probe(&mut self) -> Result<(), Error> {
            self.sent.borrow_mut().push(Sent::Probe);
            if self.probe_fails {
                Err(Error::Communication)
            } else {
                Ok(())
            }
        }
        fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error> {
            self.sent.borrow_mut().push(Sent::Write(reg, vec![value]));
            self.result_for(reg)
        }
        fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
            self.sent
                .borrow_mut()
                .push(Sent::Write(reg, data.iter().cloned().collect()));
            self.result_for(reg)
        }
    }
}
