//! Game signals and sequence generation.
//!
//! A [`Signal`] is one of the four colored pads the player can press. The
//! core treats signals as opaque equality-comparable symbols; the canonical
//! [`Srgb`] color of each signal is exposed for presentation layers that
//! want a consistent palette without owning one.
//!
//! Sequence generation sits behind the [`SignalSource`] trait so hosts and
//! tests can substitute their own source. [`RandomSignalSource`] is the
//! provided implementation: independent uniform draws, adjacent repeats
//! allowed by design.

use heapless::Vec;
use palette::Srgb;
use rand::Rng;

/// One of the fixed set of colored signals the machine can emit and the
/// player can reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Signal {
    /// Number of distinct signals.
    pub const COUNT: usize = 4;

    /// All signals, in index order.
    pub const ALL: [Signal; Signal::COUNT] =
        [Signal::Red, Signal::Green, Signal::Blue, Signal::Yellow];

    /// Returns the signal at the given index, if in range.
    pub fn from_index(index: usize) -> Option<Signal> {
        Self::ALL.get(index).copied()
    }

    /// The canonical display color for this signal.
    ///
    /// Components are in the 0.0-1.0 range. Presentation layers should
    /// convert to their native format (8-bit RGB, PWM duty cycles, CSS).
    pub fn color(&self) -> Srgb {
        match self {
            Signal::Red => Srgb::new(1.0, 0.0, 0.0),
            Signal::Green => Srgb::new(0.0, 1.0, 0.0),
            Signal::Blue => Srgb::new(0.0, 0.0, 1.0),
            Signal::Yellow => Srgb::new(1.0, 1.0, 0.0),
        }
    }
}

/// Trait for abstracting the source of generated signals.
///
/// Implement this to control sequence contents (scripted sequences in
/// tests, seeded runs for daily challenges). [`RandomSignalSource`] covers
/// the normal case.
pub trait SignalSource {
    /// Returns the next signal. Calls are independent; the same signal may
    /// be returned twice in a row.
    fn next_signal(&mut self) -> Signal;

    /// Generates a sequence of `length` signals by repeated
    /// [`next_signal`](Self::next_signal) calls.
    ///
    /// # Panics
    /// Panics if `length` exceeds the capacity `N`.
    fn generate<const N: usize>(&mut self, length: usize) -> Vec<Signal, N> {
        let mut sequence = Vec::new();
        for _ in 0..length {
            if sequence.push(self.next_signal()).is_err() {
                panic!("sequence capacity exceeded");
            }
        }
        sequence
    }
}

/// Uniformly random signal source backed by any [`rand::Rng`].
#[derive(Debug)]
pub struct RandomSignalSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSignalSource<R> {
    /// Creates a source drawing from the given RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SignalSource for RandomSignalSource<R> {
    fn next_signal(&mut self) -> Signal {
        let index = self.rng.gen_range(0..Signal::COUNT);
        Signal::ALL[index]
    }
}
