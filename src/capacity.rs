/*!
# Capacity Abstraction

Capacities are generic over the signed integer type carrying them. The solver
stores the *net* terminal capacity `source_cap - sink_cap` per node, so even
though the public API only accepts non-negative values, the carrying type must
be signed.

## Overflow

No runtime overflow detection is performed. The caller must pick a type wide
enough that the **sum of all capacities** in the network fits; `i64` satisfies
this for any realistic segmentation instance and is the type the provided
generators produce.
*/

use num::Signed;
use std::ops::{AddAssign, SubAssign};

/// Numeric requirements for terminal and link capacities.
///
/// Blanket-implemented for every eligible type; in practice `i32`, `i64` or
/// `i128`. Floats do not qualify as they are not totally ordered.
pub trait Capacity: Signed + Ord + Copy + AddAssign + SubAssign {}

impl<C: Signed + Ord + Copy + AddAssign + SubAssign> Capacity for C {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_capacity<C: Capacity>() {}

    #[test]
    fn signed_integers_qualify() {
        assert_capacity::<i32>();
        assert_capacity::<i64>();
        assert_capacity::<i128>();
    }
}
