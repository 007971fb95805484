use crate::constants::*;
use crate::types::Rect;
use rand::Rng;
use log::debug;

/// The player's box: horizontally centred, resting on the bottom edge.
pub fn spawn_player() -> Rect {
    Rect::new(WIDTH / 2, HEIGHT - PLAYER_SIZE, PLAYER_SIZE, PLAYER_SIZE)
}

/// A fresh meteor at the top edge, somewhere in the middle half of the surface.
pub fn spawn_meteor(rng: &mut impl Rng, screen_width: i32) -> Rect {
    let quarter = screen_width / 4;
    let x = rng.gen_range(quarter..=screen_width - quarter);
    debug!("Spawning meteor at x = {}", x);
    Rect::new(x, 0, METEOR_SIZE, METEOR_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_player_position() {
        let player = spawn_player();
        assert_eq!(player, Rect::new(400, 550, 50, 50));
        assert_eq!(player.bottom(), HEIGHT);
    }

    #[test]
    fn test_meteor_spawn_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..5000 {
            let meteor = spawn_meteor(&mut rng, WIDTH);
            assert!((200..=600).contains(&meteor.x), "x out of band: {}", meteor.x);
            assert_eq!(meteor.y, 0);
            assert_eq!((meteor.width, meteor.height), (METEOR_SIZE, METEOR_SIZE));
            seen_low |= meteor.x < 250;
            seen_high |= meteor.x > 550;
        }
        assert!(seen_low && seen_high, "spawns should cover the whole band");
    }

    #[test]
    fn test_meteor_spawn_follows_width() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let meteor = spawn_meteor(&mut rng, 100);
            assert!((25..=75).contains(&meteor.x));
        }
    }
}
