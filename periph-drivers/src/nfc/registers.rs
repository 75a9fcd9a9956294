//! ST25DV0xK register map
//!
//! System registers live behind the system-area device address and are
//! non-volatile, writable only after an I2C password has been presented.
//! Dynamic registers sit in the user-area address space at `0x2000` and
//! reset on power cycle.

/// Non-volatile configuration and identification registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SystemRegister {
    Gpo = 0x0000,
    ItTime = 0x0001,
    EhMode = 0x0002,
    RfMngt = 0x0003,
    Rfa1ss = 0x0004,
    Enda1 = 0x0005,
    Rfa2ss = 0x0006,
    Enda2 = 0x0007,
    Rfa3ss = 0x0008,
    Enda3 = 0x0009,
    Rfa4ss = 0x000A,
    I2css = 0x000B,
    LockCcfile = 0x000C,
    MbMode = 0x000D,
    MbWdg = 0x000E,
    LockCfg = 0x000F,
    LockDsfid = 0x0010,
    LockAfi = 0x0011,
    Dsfid = 0x0012,
    Afi = 0x0013,
    /// Two bytes, little-endian: last addressable 4-byte block
    MemSize = 0x0014,
    BlkSize = 0x0016,
    IcRef = 0x0017,
    /// Eight bytes
    Uid = 0x0018,
    ProdCode = 0x001D,
    ManufCode = 0x001E,
    IcRev = 0x0020,
    I2cPwd = 0x0900,
}

impl SystemRegister {
    pub const fn address(self) -> u16 {
        self as u16
    }
}

/// Volatile control and status registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum DynamicRegister {
    GpoCtrl = 0x2000,
    EhCtrl = 0x2002,
    RfMngt = 0x2003,
    /// I2C security session: non-zero once a valid password is presented
    I2cSso = 0x2004,
    ItSts = 0x2005,
    MbCtrl = 0x2006,
    /// Mailbox message length minus one
    MbLen = 0x2007,
}

impl DynamicRegister {
    pub const fn address(self) -> u16 {
        self as u16
    }
}

/// Either register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    System(SystemRegister),
    Dynamic(DynamicRegister),
}

impl From<SystemRegister> for Register {
    fn from(register: SystemRegister) -> Self {
        Self::System(register)
    }
}

impl From<DynamicRegister> for Register {
    fn from(register: DynamicRegister) -> Self {
        Self::Dynamic(register)
    }
}

/// Generic on/off switch for the low-power pin and the RF interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Off,
    On,
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<State> for bool {
    fn from(state: State) -> Self {
        state == State::On
    }
}
