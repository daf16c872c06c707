//! Tests for copying true walls into the discovered maze

#[cfg(test)]
mod tests {
    use micromouse::algorithm::generation::generate;
    use micromouse::algorithm::sensing::sense_and_record;
    use micromouse::spatial::{Grid, Position, Walls};

    // Tests sensing copies exactly the four walls of one cell
    // Verified by copying the walls of a neighbouring cell
    #[test]
    fn test_sense_copies_walls() {
        let maze = generate(5, 5, 11).expect("valid dimensions");
        let mut discovered = Grid::new(5, 5);
        let position = Position::new(2, 3);

        assert!(sense_and_record(&maze, &mut discovered, position));
        assert_eq!(discovered.walls(position), maze.walls(position));
        assert!(discovered.is_sensed(position));
        assert!(!discovered.is_visited(position));

        for other in discovered.positions().filter(|&p| p != position) {
            assert_eq!(discovered.walls(other), Walls::CLOSED);
            assert!(!discovered.is_sensed(other));
        }
    }

    // Tests repeated sensing leaves the same result
    // Verified by toggling walls on every call
    #[test]
    fn test_sense_is_idempotent() {
        let maze = generate(4, 4, 2).expect("valid dimensions");
        let mut discovered = Grid::new(4, 4);
        let position = Position::new(1, 1);

        sense_and_record(&maze, &mut discovered, position);
        let snapshot = discovered.clone();
        sense_and_record(&maze, &mut discovered, position);
        assert_eq!(discovered, snapshot);
    }

    // Tests positions outside the grid leave the discovered maze untouched
    // Verified by removing the bounds check
    #[test]
    fn test_sense_out_of_grid() {
        let maze = generate(3, 3, 0).expect("valid dimensions");
        let mut discovered = Grid::new(3, 3);

        assert!(!sense_and_record(&maze, &mut discovered, Position::new(3, 1)));
        assert!(!sense_and_record(&maze, &mut discovered, Position::new(-1, 0)));
        assert_eq!(discovered, Grid::new(3, 3));
    }
}
