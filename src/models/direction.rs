use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }

    /// Unit offset in screen space (rows grow downward).
    pub fn offset(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Draw a direction that differs from `previous`.
    pub fn random_except<R: Rng + ?Sized>(rng: &mut R, previous: Direction) -> Direction {
        let others: Vec<Direction> = Self::ALL.into_iter().filter(|d| *d != previous).collect();
        others[rng.random_range(0..others.len())]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_except_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        for previous in Direction::ALL {
            for _ in 0..50 {
                assert_ne!(Direction::random_except(&mut rng, previous), previous);
            }
        }
    }

    #[test]
    fn test_offsets_point_along_the_glyph() {
        assert_eq!(Direction::Up.offset(), (0.0, -1.0));
        assert_eq!(Direction::Right.offset(), (1.0, 0.0));
        assert_eq!(Direction::Left.to_string(), "Left");
        assert_eq!(Direction::Down.glyph(), "↓");
    }
}
