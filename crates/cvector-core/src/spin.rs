//! Spin: a time-ordered, low-collision extension level.
//!
//! Spinning a vector appends `.<spin>.0`, giving events that share one
//! logical hop a sortable sub-ordering without touching the shared extension
//! counter. The spin value packs a time slot above a few random bytes:
//!
//! ```text
//! | time slot (periodicity bits) | entropy (8 * entropy bytes) |
//! ```
//!
//! The time slot is a 100-nanosecond tick clock with the low
//! `interval` bits dropped. Only `periodicity` bits of it are kept, so the
//! value wraps once per period.
//!
//! Within a process, values for a given interval and entropy width are
//! issued through a lock-free counter that never hands out a packed value at
//! or below the previous one, so spins stay strictly ordered (modulo the
//! periodic wrap) even when several land in the same time slot.
//!
//! # Examples
//!
//! ```
//! use cvector_core::{spin_with_parameters, SpinEntropy, SpinInterval, SpinParameters, SpinPeriodicity};
//!
//! let params = SpinParameters::new(SpinInterval::Fine, SpinPeriodicity::Short, SpinEntropy::Two);
//! let spun = spin_with_parameters("tul4NUsfs9Cl7mOf.0", &params).unwrap().into_value();
//! let value = spun.value();
//! let parts: Vec<&str> = value.split('.').collect();
//! assert_eq!(parts.len(), 4);
//! assert_eq!(parts[3], "0");
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SEPARATOR;
use crate::errors::{Outcome, VectorError};
use crate::format;
use crate::validation;
use crate::vector::CorrelationVector;

/// How many low-order tick bits are dropped. Finer keeps more resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinInterval {
    /// Drop 24 bits (~1.68 s per slot).
    Coarse,
    /// Drop 20 bits (~105 ms per slot).
    Medium,
    /// Drop 16 bits (~6.5 ms per slot).
    #[default]
    Fine,
}

impl SpinInterval {
    pub const fn ticks_bits_to_drop(self) -> u32 {
        match self {
            Self::Coarse => 24,
            Self::Medium => 20,
            Self::Fine => 16,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Coarse => 0,
            Self::Medium => 1,
            Self::Fine => 2,
        }
    }
}

/// How many time-slot bits are kept before the value wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinPeriodicity {
    /// No time component; the value is entropy only.
    None,
    /// 16 bits.
    #[default]
    Short,
    /// 24 bits.
    Medium,
    /// 32 bits.
    Long,
}

impl SpinPeriodicity {
    pub const fn bits(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Short => 16,
            Self::Medium => 24,
            Self::Long => 32,
        }
    }
}

/// Random bytes mixed below the time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinEntropy {
    None,
    One,
    #[default]
    Two,
    Four,
}

impl SpinEntropy {
    pub const fn bytes(self) -> u32 {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    pub const fn bits(self) -> u32 {
        self.bytes() * 8
    }

    const fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 3,
        }
    }
}

/// Spin configuration. Defaults to fine interval, short periodicity, two
/// bytes of entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpinParameters {
    pub interval: SpinInterval,
    pub periodicity: SpinPeriodicity,
    pub entropy: SpinEntropy,
}

impl SpinParameters {
    pub fn new(interval: SpinInterval, periodicity: SpinPeriodicity, entropy: SpinEntropy) -> Self {
        Self {
            interval,
            periodicity,
            entropy,
        }
    }

    /// Width of the emitted spin value in bits (at most 64).
    pub fn total_bits(&self) -> u32 {
        self.periodicity.bits() + self.entropy.bits()
    }

    fn mask(&self) -> u64 {
        match self.total_bits() {
            64 => u64::MAX,
            bits => (1u64 << bits) - 1,
        }
    }

    /// Render a spin value. Values wider than 32 bits take two segments.
    fn render(&self, value: u64) -> String {
        if self.total_bits() > 32 {
            format!("{}{SEPARATOR}{}", value >> 32, value as u32)
        } else {
            value.to_string()
        }
    }
}

const TICK_NANOS: u128 = 100;

/// Wall-clock anchor taken once per process; later readings advance by a
/// monotonic `Instant` so the tick clock never runs backwards.
struct TickAnchor {
    wall_ticks: u64,
    started: Instant,
}

static TICK_ANCHOR: LazyLock<TickAnchor> = LazyLock::new(|| {
    let wall_ticks = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_nanos() / TICK_NANOS) as u64)
        .unwrap_or(0);
    TickAnchor {
        wall_ticks,
        started: Instant::now(),
    }
});

/// 100-nanosecond ticks since the Unix epoch, monotonic within the process.
pub fn now_ticks() -> u64 {
    let anchor = &*TICK_ANCHOR;
    anchor.wall_ticks + (anchor.started.elapsed().as_nanos() / TICK_NANOS) as u64
}

const INTERVALS: usize = 3;
const UNSET: u64 = 0;
const ENTROPY_WIDTHS: usize = 4;

/// Issues packed spin values, one lock-free counter per slot layout.
#[derive(Debug)]
pub struct SpinClock {
    last: [AtomicU64; INTERVALS * ENTROPY_WIDTHS],
}

static GLOBAL_SPIN_CLOCK: SpinClock = SpinClock::new();

impl SpinClock {
    pub const fn new() -> Self {
        Self {
            last: [const { AtomicU64::new(UNSET) }; INTERVALS * ENTROPY_WIDTHS],
        }
    }

    /// The process-wide spin clock.
    pub fn global() -> &'static SpinClock {
        &GLOBAL_SPIN_CLOCK
    }

    /// Next spin value for `parameters`, masked to its total width.
    pub fn next_value(&self, parameters: &SpinParameters) -> u64 {
        let entropy_bits = parameters.entropy.bits();
        let slot = now_ticks() >> parameters.interval.ticks_bits_to_drop();
        let fresh = (slot << entropy_bits) | random_bits(entropy_bits);
        self.advance(parameters, fresh) & parameters.mask()
    }

    /// Issue `fresh`, or the previous value plus one if `fresh` is not ahead
    /// of it. Comparison is in serial-number order so the unmasked counter
    /// may wrap the u64 space.
    fn advance(&self, parameters: &SpinParameters, fresh: u64) -> u64 {
        let cell = &self.last[parameters.interval.index() * ENTROPY_WIDTHS + parameters.entropy.index()];
        loop {
            let snapshot = cell.load(Ordering::Acquire);
            let ahead = snapshot == UNSET || (fresh.wrapping_sub(snapshot) as i64) > 0;
            let next = if ahead { fresh } else { snapshot.wrapping_add(1) };
            if cell
                .compare_exchange_weak(snapshot, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return next;
            }
        }
    }
}

impl Default for SpinClock {
    fn default() -> Self {
        Self::new()
    }
}

fn random_bits(bits: u32) -> u64 {
    if bits == 0 {
        return 0;
    }
    u64::from(rand::thread_rng().next_u32()) & ((1u64 << bits) - 1)
}

/// Spin an incoming value with the default parameters, leniently.
pub fn spin(vector: &str) -> Result<Outcome<CorrelationVector>, VectorError> {
    spin_vector(vector, &SpinParameters::default(), false)
}

/// Spin an incoming value with explicit parameters, leniently.
pub fn spin_with_parameters(
    vector: &str,
    parameters: &SpinParameters,
) -> Result<Outcome<CorrelationVector>, VectorError> {
    spin_vector(vector, parameters, false)
}

pub(crate) fn spin_vector(
    vector: &str,
    parameters: &SpinParameters,
    strict: bool,
) -> Result<Outcome<CorrelationVector>, VectorError> {
    if format::is_immutable(vector) {
        return CorrelationVector::parse(vector);
    }

    let (version, inferred) = format::infer_version(vector);
    if strict {
        validation::validate(vector, version)?;
    }

    let value = SpinClock::global().next_value(parameters);
    let base = format!("{vector}{SEPARATOR}{}", parameters.render(value));
    if format::is_oversized(&base, 0, version) {
        debug!(vector, %version, "spin would exceed length ceiling, terminating");
        return CorrelationVector::terminated(vector);
    }

    debug!(vector, spin = value, "spun correlation vector");
    Ok(Outcome::with_error(
        CorrelationVector::from_parts(base, 0, version, false),
        inferred,
    ))
}
