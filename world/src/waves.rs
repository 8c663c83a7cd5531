//! Wave scheduling and lifecycle state.
//!
//! A wave moves through four phases: idle, spawning, active, and settling.
//! Spawns are scheduled as absolute virtual-time instructions when the wave
//! starts, so replaying the same commands always releases enemies on the
//! same ticks.

use std::collections::VecDeque;

use neon_siege_core::{
    catalog::{EnemyTypeId, WaveDefinition},
    WaveError,
};

/// Milliseconds inserted between consecutive spawn groups of one wave.
pub(crate) const INTER_GROUP_GAP_MS: u64 = 400;

/// Milliseconds between the path clearing and the next wave arming.
pub(crate) const SETTLE_DELAY_MS: u64 = 800;

/// Flat gold credited for any completed wave.
const WAVE_BONUS_BASE: u32 = 50;

/// Additional gold credited per completed wave index.
const WAVE_BONUS_STEP: u32 = 15;

/// Fractional hit-point growth applied per wave index at spawn time.
const HEALTH_GROWTH_PER_WAVE: f64 = 0.12;

/// One scheduled enemy release, due at an absolute virtual time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SpawnInstruction {
    due_at_ms: u64,
    kind: EnemyTypeId,
}

/// Lifecycle of the wave currently in flight, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WavePhase {
    /// No wave is in flight; the next one may start.
    Idle,
    /// Spawn instructions are still waiting to be dispatched.
    Spawning,
    /// Every instruction fired and enemies remain on the path.
    Active,
    /// The path is clear; the next wave arms when the countdown expires.
    Settling { remaining_ms: u64 },
}

/// Deterministic scheduler that walks waves through their lifecycle.
#[derive(Debug)]
pub(crate) struct WaveMachine {
    wave_index: u32,
    total_waves: u32,
    phase: WavePhase,
    pending: VecDeque<SpawnInstruction>,
}

impl WaveMachine {
    pub(crate) fn new(total_waves: u32) -> Self {
        Self {
            wave_index: 0,
            total_waves,
            phase: WavePhase::Idle,
            pending: VecDeque::new(),
        }
    }

    /// Discards pending spawns and rewinds to the first wave.
    pub(crate) fn reset(&mut self) {
        self.wave_index = 0;
        self.phase = WavePhase::Idle;
        self.pending.clear();
    }

    /// Index of the wave currently in flight, or of the next one to start.
    pub(crate) const fn wave_index(&self) -> u32 {
        self.wave_index
    }

    /// Reports whether a wave is spawning, fighting, or settling.
    pub(crate) fn in_flight(&self) -> bool {
        self.phase != WavePhase::Idle
    }

    /// Reports whether every wave has been dispatched and resolved.
    pub(crate) fn all_cleared(&self) -> bool {
        self.wave_index >= self.total_waves && !self.in_flight()
    }

    /// Schedules the next wave's spawn instructions relative to `now_ms`.
    ///
    /// Groups dispatch in definition order. Within a group, spawns are spaced
    /// by the group's delay; each later group starts after the full span of
    /// the previous one plus [`INTER_GROUP_GAP_MS`]. Returns the index of the
    /// wave that was started.
    pub(crate) fn try_start(
        &mut self,
        definition: Option<&WaveDefinition>,
        now_ms: u64,
    ) -> Result<u32, WaveError> {
        if self.in_flight() {
            return Err(WaveError::WaveInFlight);
        }
        let Some(definition) = definition else {
            return Err(WaveError::AllWavesDispatched);
        };

        let mut group_start_ms = now_ms;
        for group in &definition.groups {
            let delay = u64::from(group.spawn_delay_ms);
            for index in 0..u64::from(group.count) {
                self.pending.push_back(SpawnInstruction {
                    due_at_ms: group_start_ms + index * delay,
                    kind: group.kind,
                });
            }
            group_start_ms += u64::from(group.count) * delay + INTER_GROUP_GAP_MS;
        }

        self.phase = WavePhase::Spawning;
        Ok(self.wave_index)
    }

    /// Pops every instruction due at or before `now_ms` into `out`,
    /// preserving schedule order.
    pub(crate) fn take_due(&mut self, now_ms: u64, out: &mut Vec<EnemyTypeId>) {
        out.clear();
        while let Some(instruction) = self.pending.front() {
            if instruction.due_at_ms > now_ms {
                break;
            }
            out.push(instruction.kind);
            let _ = self.pending.pop_front();
        }
    }

    /// Advances the lifecycle after combat has resolved for one tick.
    ///
    /// Returns the index of a wave that finished settling this tick. The
    /// settling countdown starts on the tick after the path clears, so the
    /// clearing tick itself does not shorten it.
    pub(crate) fn resolve_completion(&mut self, enemies_empty: bool, dt_ms: u64) -> Option<u32> {
        if self.phase == WavePhase::Spawning && self.pending.is_empty() {
            self.phase = WavePhase::Active;
        }
        if self.phase == WavePhase::Active {
            if enemies_empty {
                self.phase = WavePhase::Settling {
                    remaining_ms: SETTLE_DELAY_MS,
                };
            }
            return None;
        }
        if let WavePhase::Settling { remaining_ms } = &mut self.phase {
            *remaining_ms = remaining_ms.saturating_sub(dt_ms);
            if *remaining_ms == 0 {
                let completed = self.wave_index;
                self.wave_index += 1;
                self.phase = WavePhase::Idle;
                return Some(completed);
            }
        }
        None
    }
}

/// Spawn-time hit points for an enemy released during the given wave.
///
/// Growth is computed in `f64` before flooring so large bases land on the
/// intended integer.
pub(crate) fn scaled_health(base: u32, wave_index: u32) -> u32 {
    let scaled = f64::from(base) * (1.0 + HEALTH_GROWTH_PER_WAVE * f64::from(wave_index));
    scaled.floor() as u32
}

/// Gold credited when the wave with the given index completes.
pub(crate) fn completion_bonus(wave_index: u32) -> u32 {
    WAVE_BONUS_BASE + WAVE_BONUS_STEP * wave_index
}
