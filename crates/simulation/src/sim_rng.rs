//! Seeded RNG behind landing crash rolls and wreck tumbling.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Stream position of the generator, so a loaded game draws the same rolls
/// the saved one would have.
#[derive(Encode, Decode)]
struct StreamState {
    key: [u8; 32],
    stream: u64,
    word_pos: u128,
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&StreamState {
            key: self.0.get_seed(),
            stream: self.0.get_stream(),
            word_pos: self.0.get_word_pos(),
        }))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match bitcode::decode::<StreamState>(bytes) {
            Ok(state) => {
                let mut rng = ChaCha8Rng::from_seed(state.key);
                rng.set_stream(state.stream);
                rng.set_word_pos(state.word_pos);
                Self(rng)
            }
            Err(e) => {
                warn!("sim_rng: undecodable stream state, reseeding: {}", e);
                Self::default()
            }
        }
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>()
            .init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimRng>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crash::CRASH_ROLL_BITS;
    use crate::Saveable;
    use rand::Rng;

    fn landing_rolls(rng: &mut SimRng, n: usize) -> Vec<u32> {
        (0..n)
            .map(|_| rng.0.gen::<u32>() & ((1 << CRASH_ROLL_BITS) - 1))
            .collect()
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = SimRng::seeded(7);
        let mut b = SimRng::seeded(7);
        assert_eq!(landing_rolls(&mut a, 16), landing_rolls(&mut b, 16));
        assert_ne!(
            landing_rolls(&mut SimRng::seeded(1), 16),
            landing_rolls(&mut SimRng::seeded(2), 16)
        );
    }

    #[test]
    fn test_loaded_rng_continues_mid_stream() {
        let mut rng = SimRng::seeded(999);
        landing_rolls(&mut rng, 100);

        let bytes = rng.save_to_bytes().expect("rng always saves");
        let mut restored = SimRng::load_from_bytes(&bytes);

        assert_eq!(landing_rolls(&mut rng, 50), landing_rolls(&mut restored, 50));
    }

    #[test]
    fn test_garbage_state_reseeds_with_default() {
        let mut restored = SimRng::load_from_bytes(&[1, 2, 3]);
        assert_eq!(
            landing_rolls(&mut restored, 4),
            landing_rolls(&mut SimRng::default(), 4)
        );
    }
}
