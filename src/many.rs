//! Repeated / unique generation driver.

use tracing::debug;

use crate::config::UniqueBudget;
use crate::context::GenerationContext;

/// Append generated items to `destination` until it holds
/// `already_present + count` items.
///
/// `count = None` asks the configuration for a repeat count. When `unique` is
/// set, a candidate equal to an item already in `destination` is rejected and
/// counts against [`generate_attempts_threshold`]:
///
/// - [`UniqueBudget::Global`]: the attempt counter starts at 1 and grows with
///   every rejection across the whole batch. Reaching the threshold ends the
///   batch, so a constant factory runs at most `threshold` times and leaves a
///   single item.
/// - [`UniqueBudget::PerSlot`]: each slot gets its own counter; reaching the
///   threshold accepts the last candidate even though it is a duplicate.
///
/// [`generate_attempts_threshold`]: crate::AutoFakerConfig::generate_attempts_threshold
pub fn generate_many<T, F>(
    ctx: &mut GenerationContext<'_>,
    count: Option<usize>,
    destination: &mut Vec<T>,
    unique: bool,
    already_present: usize,
    mut factory: F,
) where
    T: PartialEq,
    F: FnMut(&mut GenerationContext<'_>) -> T,
{
    let config = ctx.config();
    let count = match count {
        Some(n) => n,
        None => config.repeat_count(ctx),
    };
    let required = already_present + count;

    if !unique {
        while destination.len() < required {
            destination.push(factory(ctx));
        }
        return;
    }

    let threshold = config.generate_attempts_threshold();
    match config.unique_budget() {
        UniqueBudget::Global => {
            let mut attempt = 1;
            while destination.len() < required {
                let candidate = factory(ctx);
                if !destination.contains(&candidate) {
                    destination.push(candidate);
                    continue;
                }
                attempt += 1;
                if attempt >= threshold {
                    debug!(
                        threshold,
                        produced = destination.len(),
                        required,
                        "unique generation budget exhausted"
                    );
                    break;
                }
            }
        }
        UniqueBudget::PerSlot => {
            while destination.len() < required {
                let mut attempt = 1;
                loop {
                    let candidate = factory(ctx);
                    if !destination.contains(&candidate) {
                        destination.push(candidate);
                        break;
                    }
                    if attempt >= threshold {
                        debug!(threshold, slot = destination.len(), "accepting duplicate");
                        destination.push(candidate);
                        break;
                    }
                    attempt += 1;
                }
            }
        }
    }
}
