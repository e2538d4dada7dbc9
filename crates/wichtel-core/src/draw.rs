//! Giver/receiver assignment drawing and draw-eligibility gating.
//!
//! The draw is a uniform Fisher-Yates shuffle followed by a single-cycle
//! rotation: everyone gives to the next person in the shuffled circle. The
//! rotation satisfies the bijection and no-self-assignment invariants by
//! construction, with no rejection sampling. Known limitation: only
//! derangements that are single n-cycles are reachable, so the draw does not
//! sample uniformly over all derangements.

use std::collections::HashMap;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

/// Giver id -> receiver id. Total over the drawn participant set, bijective,
/// and fixed-point free whenever at least two ids were drawn.
pub type Assignment = HashMap<String, String>;

/// Readiness snapshot for one group, taken by the caller at dispatch time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupReadiness {
    pub total_members: usize,
    pub ready_members: usize,
    pub is_draw_complete: bool,
}

/// Calendar distance to the exchange event. `None` means no date configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawClock {
    /// Fractional days until the event: `(event - now) / 1 day`.
    pub days_until_event: Option<f64>,
}

/// Thresholds for the two draw windows.
///
/// The automatic trigger fires close to the event; an administrator may
/// force the draw earlier, inside a wider window. Full readiness is a hard
/// precondition for both -- the force window never bypasses it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawPolicy {
    /// Days before the event at which the automatic draw may fire.
    #[serde(default = "default_auto_threshold")]
    pub auto_threshold_days: f64,

    /// Days before the event at which a forced draw is allowed.
    #[serde(default = "default_force_threshold")]
    pub force_threshold_days: f64,
}

fn default_auto_threshold() -> f64 {
    14.0
}
fn default_force_threshold() -> f64 {
    21.0
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            auto_threshold_days: default_auto_threshold(),
            force_threshold_days: default_force_threshold(),
        }
    }
}

/// Shared gate for both draw windows: the group is undrawn, has at least two
/// members, every member is ready, and the event is close enough.
fn window_open(readiness: GroupReadiness, clock: DrawClock, threshold_days: f64) -> bool {
    if readiness.is_draw_complete || readiness.total_members <= 1 {
        return false;
    }
    if readiness.ready_members != readiness.total_members {
        return false;
    }
    match clock.days_until_event {
        Some(days) => days <= threshold_days,
        None => false,
    }
}

/// Whether the automatic draw may fire for a group. Boundary is inclusive:
/// exactly `auto_threshold_days` out counts as inside the window.
pub fn can_auto_draw(readiness: GroupReadiness, clock: DrawClock, policy: &DrawPolicy) -> bool {
    window_open(readiness, clock, policy.auto_threshold_days)
}

/// Whether an administrator may force the draw. Same gate as
/// [`can_auto_draw`] with the wider threshold.
pub fn can_force_draw(readiness: GroupReadiness, clock: DrawClock, policy: &DrawPolicy) -> bool {
    window_open(readiness, clock, policy.force_threshold_days)
}

/// Build the single-cycle rotation over an already-ordered sequence:
/// position `i` gives to position `(i + 1) % n`.
pub fn cycle_assignment(order: &[String]) -> Assignment {
    let n = order.len();
    if n < 2 {
        return Assignment::new();
    }
    let mut assignment = Assignment::with_capacity(n);
    for (i, giver) in order.iter().enumerate() {
        assignment.insert(giver.clone(), order[(i + 1) % n].clone());
    }
    assignment
}

/// Draw a randomized assignment over `ids` using the supplied RNG.
///
/// Fewer than two ids is a defined no-op returning an empty map. Duplicate
/// ids are a caller contract violation; the caller must deduplicate first.
pub fn draw<R: Rng + ?Sized>(ids: &[String], rng: &mut R) -> Assignment {
    if ids.len() < 2 {
        return Assignment::new();
    }
    let mut shuffled = ids.to_vec();
    shuffled.shuffle(rng);
    cycle_assignment(&shuffled)
}

/// Draw front-end bundling the policy with a seedable RNG.
///
/// `seed: None` pulls entropy per draw; a fixed seed makes the draw
/// reproducible for tests.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    policy: DrawPolicy,
    seed: Option<u64>,
}

impl DrawEngine {
    /// Engine with default policy and entropy seeding.
    pub fn new() -> Self {
        Self::with_policy(DrawPolicy::default())
    }

    /// Engine with a custom policy.
    pub fn with_policy(policy: DrawPolicy) -> Self {
        Self { policy, seed: None }
    }

    /// Fix the RNG seed (used by tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn policy(&self) -> &DrawPolicy {
        &self.policy
    }

    /// Run the draw over `ids`.
    pub fn draw(&self, ids: &[String]) -> Assignment {
        let mut rng = match self.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        draw(ids, &mut rng)
    }

    pub fn can_auto_draw(&self, readiness: GroupReadiness, clock: DrawClock) -> bool {
        can_auto_draw(readiness, clock, &self.policy)
    }

    pub fn can_force_draw(&self, readiness: GroupReadiness, clock: DrawClock) -> bool {
        can_force_draw(readiness, clock, &self.policy)
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn ready(total: usize, ready: usize) -> GroupReadiness {
        GroupReadiness {
            total_members: total,
            ready_members: ready,
            is_draw_complete: false,
        }
    }

    fn clock(days: f64) -> DrawClock {
        DrawClock {
            days_until_event: Some(days),
        }
    }

    fn assert_valid_assignment(input: &[String], assignment: &Assignment) {
        assert_eq!(assignment.len(), input.len());
        let givers: HashSet<_> = assignment.keys().collect();
        let receivers: HashSet<_> = assignment.values().collect();
        let expected: HashSet<_> = input.iter().collect();
        assert_eq!(givers, expected);
        assert_eq!(receivers, expected);
        for (giver, receiver) in assignment {
            assert_ne!(giver, receiver, "self-assignment for {giver}");
        }
    }

    #[test]
    fn empty_input_yields_empty_assignment() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(draw(&[], &mut rng).is_empty());
    }

    #[test]
    fn single_participant_yields_empty_assignment() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(draw(&ids(&["solo"]), &mut rng).is_empty());
    }

    #[test]
    fn two_participants_swap() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let input = ids(&["a", "b"]);
        let assignment = draw(&input, &mut rng);
        assert_eq!(assignment["a"], "b");
        assert_eq!(assignment["b"], "a");
    }

    #[test]
    fn draw_is_bijective_without_fixed_points() {
        let input = ids(&["a", "b", "c", "d", "e", "f"]);
        for seed in 0..50 {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let assignment = draw(&input, &mut rng);
            assert_valid_assignment(&input, &assignment);
        }
    }

    #[test]
    fn rotation_rule_matches_shuffled_order() {
        // Fixed order [C, A, D, B] must produce {C:A, A:D, D:B, B:C}.
        let order = ids(&["C", "A", "D", "B"]);
        let assignment = cycle_assignment(&order);
        assert_eq!(assignment["C"], "A");
        assert_eq!(assignment["A"], "D");
        assert_eq!(assignment["D"], "B");
        assert_eq!(assignment["B"], "C");
    }

    #[test]
    fn three_participant_rotations_are_roughly_uniform() {
        // With 3 ids there are (n-1)! = 2 distinct rotations. Over 10k
        // trials each should land near 5000; +/-600 is far outside noise.
        let input = ids(&["a", "b", "c"]);
        let mut rng = Mcg128Xsl64::seed_from_u64(42);
        let mut forward = 0u32;
        let mut backward = 0u32;
        for _ in 0..10_000 {
            let assignment = draw(&input, &mut rng);
            if assignment["a"] == "b" {
                forward += 1;
            } else {
                backward += 1;
            }
        }
        assert_eq!(forward + backward, 10_000);
        assert!((4400..=5600).contains(&forward), "forward = {forward}");
    }

    #[test]
    fn seeded_engine_is_reproducible() {
        let engine = DrawEngine::new().with_seed(99);
        let input = ids(&["a", "b", "c", "d"]);
        assert_eq!(engine.draw(&input), engine.draw(&input));
    }

    #[test]
    fn auto_draw_requires_full_readiness() {
        let policy = DrawPolicy::default();
        assert!(!can_auto_draw(ready(3, 2), clock(1.0), &policy));
        assert!(can_auto_draw(ready(3, 3), clock(1.0), &policy));
    }

    #[test]
    fn auto_draw_requires_configured_date() {
        let policy = DrawPolicy::default();
        let no_date = DrawClock {
            days_until_event: None,
        };
        assert!(!can_auto_draw(ready(3, 3), no_date, &policy));
    }

    #[test]
    fn auto_draw_boundary_is_inclusive() {
        let policy = DrawPolicy::default();
        assert!(can_auto_draw(ready(3, 3), clock(14.0), &policy));
        assert!(!can_auto_draw(ready(3, 3), clock(14.001), &policy));
    }

    #[test]
    fn auto_draw_rejects_completed_and_tiny_groups() {
        let policy = DrawPolicy::default();
        let done = GroupReadiness {
            total_members: 3,
            ready_members: 3,
            is_draw_complete: true,
        };
        assert!(!can_auto_draw(done, clock(1.0), &policy));
        assert!(!can_auto_draw(ready(1, 1), clock(1.0), &policy));
        assert!(!can_auto_draw(ready(0, 0), clock(1.0), &policy));
    }

    #[test]
    fn example_scenario_from_readiness_and_clock() {
        let policy = DrawPolicy::default();
        assert!(can_auto_draw(ready(3, 3), clock(10.0), &policy));
        assert!(!can_auto_draw(ready(3, 3), clock(20.0), &policy));
    }

    #[test]
    fn force_window_is_strictly_wider_than_auto() {
        let policy = DrawPolicy::default();
        // Inside the force window but outside the auto window.
        assert!(can_force_draw(ready(4, 4), clock(18.0), &policy));
        assert!(!can_auto_draw(ready(4, 4), clock(18.0), &policy));
        // Everywhere auto fires, force fires too.
        for days in [0.0, 7.0, 14.0] {
            if can_auto_draw(ready(4, 4), clock(days), &policy) {
                assert!(can_force_draw(ready(4, 4), clock(days), &policy));
            }
        }
        // Readiness is never bypassed by the wider window.
        assert!(!can_force_draw(ready(4, 3), clock(18.0), &policy));
    }

    proptest! {
        #[test]
        fn draw_invariants_hold_for_arbitrary_inputs(
            n in 2usize..40,
            seed in any::<u64>(),
        ) {
            let input: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let assignment = draw(&input, &mut rng);
            assert_valid_assignment(&input, &assignment);
        }

        #[test]
        fn draw_forms_a_single_cycle(n in 2usize..20, seed in any::<u64>()) {
            let input: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            let assignment = draw(&input, &mut rng);

            let mut seen = 1usize;
            let mut current = &input[0];
            loop {
                current = &assignment[current];
                if current == &input[0] {
                    break;
                }
                seen += 1;
            }
            prop_assert_eq!(seen, n);
        }
    }
}
