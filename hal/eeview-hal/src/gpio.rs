//! GPIO pin abstractions
//!
//! Pin configuration ([`PinConfig`], [`configure_pin`]) and the runtime
//! primitives ([`Pin`], [`PinGroup`]) built on a [`RegisterFile`].
//!
//! Configuration is a sequence of masked modifies and runs once at boot.
//! The runtime primitives are single register accesses: outputs change
//! through the set/reset register, so they are safe to call from both
//! interrupt and task context without locking.

use heapless::Vec;

use crate::regs::{Field, Port, Register, RegisterFile};

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Physical pin: port plus pin number (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// GPIO port
    pub port: Port,
    /// Pin number within the port (0-15)
    pub pin: u8,
}

impl PinId {
    /// Pins per port
    pub const PER_PORT: u8 = 16;

    /// Create a pin id
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Pin number addresses an existing pin of the port
    ///
    /// Register field and mask helpers assume this holds.
    pub const fn is_valid(self) -> bool {
        self.pin < Self::PER_PORT
    }

    /// Single-bit mask of this pin within its port
    pub const fn mask(self) -> u32 {
        1 << self.pin
    }
}

/// Pin mode (MODER encoding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Digital input
    Input,
    /// General purpose output
    Output,
    /// Alternate function (peripheral controlled)
    Alternate,
    /// Analog
    Analog,
}

impl Mode {
    const fn bits(self) -> u32 {
        match self {
            Mode::Input => 0b00,
            Mode::Output => 0b01,
            Mode::Alternate => 0b10,
            Mode::Analog => 0b11,
        }
    }
}

/// Output driver type (OTYPER encoding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    /// Push-pull
    PushPull,
    /// Open drain
    OpenDrain,
}

/// Output slew speed (OSPEEDR encoding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low,
    Medium,
    Fast,
    High,
}

impl Speed {
    const fn bits(self) -> u32 {
        match self {
            Speed::Low => 0b00,
            Speed::Medium => 0b01,
            Speed::Fast => 0b10,
            Speed::High => 0b11,
        }
    }
}

/// Internal pull resistor (PUPDR encoding)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating
    None,
    /// Pull-up
    Up,
    /// Pull-down
    Down,
}

impl Pull {
    const fn bits(self) -> u32 {
        match self {
            Pull::None => 0b00,
            Pull::Up => 0b01,
            Pull::Down => 0b10,
        }
    }
}

/// Complete electrical configuration of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Pin mode
    pub mode: Mode,
    /// Output driver type
    pub output_type: OutputType,
    /// Output speed
    pub speed: Speed,
    /// Pull resistor
    pub pull: Pull,
    /// Alternate function number (0-15), only used in [`Mode::Alternate`]
    pub alternate: Option<u8>,
}

/// Register writes produced by one [`PinConfig`]
pub type FieldWrites = Vec<(Register, Field), 5>;

impl PinConfig {
    /// Reset state: input, push-pull, low speed, floating
    pub const fn input(pull: Pull) -> Self {
        Self {
            mode: Mode::Input,
            output_type: OutputType::PushPull,
            speed: Speed::Low,
            pull,
            alternate: None,
        }
    }

    /// Push-pull output, low speed, floating
    pub const fn output() -> Self {
        Self {
            mode: Mode::Output,
            ..Self::input(Pull::None)
        }
    }

    /// Alternate function `af`, push-pull, low speed, floating
    pub const fn alternate(af: u8) -> Self {
        Self {
            mode: Mode::Alternate,
            alternate: Some(af & 0xF),
            ..Self::input(Pull::None)
        }
    }

    /// Analog mode
    pub const fn analog() -> Self {
        Self {
            mode: Mode::Analog,
            ..Self::input(Pull::None)
        }
    }

    /// Same configuration with an open-drain driver
    pub const fn open_drain(self) -> Self {
        Self {
            output_type: OutputType::OpenDrain,
            ..self
        }
    }

    /// Same configuration with another output speed
    pub const fn with_speed(self, speed: Speed) -> Self {
        Self { speed, ..self }
    }

    /// Same configuration with another pull resistor
    pub const fn with_pull(self, pull: Pull) -> Self {
        Self { pull, ..self }
    }

    /// Masked register writes that apply this configuration to `pin`
    ///
    /// Mode is written last so the pin only starts driving once type,
    /// speed, pull and alternate function are in place.
    pub fn fields(&self, pin: PinId) -> FieldWrites {
        let port = pin.port;
        let slot = pin.pin;
        let mut writes = FieldWrites::new();

        let otype = match self.output_type {
            OutputType::PushPull => 0,
            OutputType::OpenDrain => 1,
        };
        // Capacity is 5 and at most 5 fields are pushed
        let _ = writes.push((Register::Otyper(port), Field::slot(slot, 1, otype)));
        let _ = writes.push((Register::Ospeedr(port), Field::slot(slot, 2, self.speed.bits())));
        let _ = writes.push((Register::Pupdr(port), Field::slot(slot, 2, self.pull.bits())));

        if let (Mode::Alternate, Some(af)) = (self.mode, self.alternate) {
            let (reg, afslot) = if slot < 8 {
                (Register::Afrl(port), slot)
            } else {
                (Register::Afrh(port), slot - 8)
            };
            let _ = writes.push((reg, Field::slot(afslot, 4, u32::from(af))));
        }

        let _ = writes.push((Register::Moder(port), Field::slot(slot, 2, self.mode.bits())));
        writes
    }
}

/// Apply `config` to `pin` with masked modifies
///
/// Bits of other pins sharing the same registers are left untouched.
/// Not safe against a concurrent `configure_pin` on the same port; run
/// all configuration from one context during init.
pub fn configure_pin<R: RegisterFile + ?Sized>(regs: &R, pin: PinId, config: &PinConfig) {
    for (reg, field) in config.fields(pin) {
        regs.modify(reg, field);
    }
}

/// Runtime handle to one configured pin
pub struct Pin<'r, R: ?Sized> {
    regs: &'r R,
    id: PinId,
}

impl<R: ?Sized> Clone for Pin<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Pin<'_, R> {}

impl<'r, R: RegisterFile + ?Sized> Pin<'r, R> {
    /// Create a handle for `id`
    pub const fn new(regs: &'r R, id: PinId) -> Self {
        Self { regs, id }
    }

    /// Physical pin this handle drives
    pub fn id(&self) -> PinId {
        self.id
    }
}

impl<R: RegisterFile + ?Sized> OutputPin for Pin<'_, R> {
    fn set_high(&mut self) {
        self.regs.write(Register::Bsrr(self.id.port), self.id.mask());
    }

    fn set_low(&mut self) {
        self.regs.write(Register::Bsrr(self.id.port), self.id.mask() << 16);
    }

    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    fn is_set_high(&self) -> bool {
        self.regs.read(Register::Odr(self.id.port)) & self.id.mask() != 0
    }
}

impl<R: RegisterFile + ?Sized> InputPin for Pin<'_, R> {
    fn is_high(&self) -> bool {
        self.regs.read(Register::Idr(self.id.port)) & self.id.mask() != 0
    }
}

/// Contiguous group of pins on one port, read and written as a value
///
/// Used for parallel buses such as an 8-bit display data bus.
pub struct PinGroup<'r, R: ?Sized> {
    regs: &'r R,
    port: Port,
    shift: u8,
    width: u8,
}

impl<'r, R: RegisterFile + ?Sized> PinGroup<'r, R> {
    /// Group of `width` pins starting at pin `first`
    pub const fn new(regs: &'r R, port: Port, first: u8, width: u8) -> Self {
        Self {
            regs,
            port,
            shift: first,
            width,
        }
    }

    fn mask(&self) -> u32 {
        (1u32 << self.width) - 1
    }

    /// Drive the group to `bits` with one set/reset write
    ///
    /// Pins outside the group are not touched.
    pub fn write(&self, bits: u32) {
        let mask = self.mask();
        let set = (bits & mask) << self.shift;
        let reset = (!bits & mask) << self.shift;
        self.regs.write(Register::Bsrr(self.port), set | (reset << 16));
    }

    /// Sample the group's input bits
    pub fn read(&self) -> u32 {
        (self.regs.read(Register::Idr(self.port)) >> self.shift) & self.mask()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sim::SimRegisters;
    use proptest::prelude::*;

    fn port() -> impl Strategy<Value = Port> {
        let ports: &'static [Port] = &Port::ALL;
        prop::sample::select(ports)
    }

    fn config() -> impl Strategy<Value = PinConfig> {
        let mode = prop_oneof![
            Just(Mode::Input),
            Just(Mode::Output),
            Just(Mode::Alternate),
            Just(Mode::Analog),
        ];
        let otype = prop_oneof![Just(OutputType::PushPull), Just(OutputType::OpenDrain)];
        let speed = prop_oneof![
            Just(Speed::Low),
            Just(Speed::Medium),
            Just(Speed::Fast),
            Just(Speed::High),
        ];
        let pull = prop_oneof![Just(Pull::None), Just(Pull::Up), Just(Pull::Down)];
        let af = prop::option::of(0u8..16);
        (mode, otype, speed, pull, af).prop_map(|(mode, output_type, speed, pull, alternate)| {
            PinConfig {
                mode,
                output_type,
                speed,
                pull,
                alternate,
            }
        })
    }

    proptest! {
        #[test]
        fn configure_pin_only_touches_own_fields(
            port in port(),
            pin in 0u8..16,
            config in config(),
            seed in any::<[u32; 6]>(),
        ) {
            let regs = SimRegisters::new();
            let touched = [
                Register::Moder(port),
                Register::Otyper(port),
                Register::Ospeedr(port),
                Register::Pupdr(port),
                Register::Afrl(port),
                Register::Afrh(port),
            ];
            for (reg, value) in touched.iter().zip(seed) {
                regs.preset(*reg, value);
            }

            let id = PinId::new(port, pin);
            configure_pin(&regs, id, &config);

            let allowed = |reg: Register| -> u32 {
                config
                    .fields(id)
                    .iter()
                    .filter(|(r, _)| *r == reg)
                    .fold(0, |acc, (_, f)| acc | f.mask)
            };

            for (reg, before) in touched.iter().zip(seed) {
                let after = regs.peek(*reg);
                prop_assert_eq!((before ^ after) & !allowed(*reg), 0);
            }

            let fields = config.fields(id);
            for (reg, field) in fields.iter() {
                prop_assert_eq!(regs.peek(*reg) & field.mask, field.value);
            }
        }
    }
}
