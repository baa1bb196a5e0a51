//! Basic example of using the N-Queens engine

use nqueens_core::{attack_fields, Engine, FigureKind, PlacementError, Position};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Preview a single queen's reach without touching a board
    println!("A queen on (1, 1) of a 4x4 board attacks:\n");
    println!("{}", attack_fields(FigureKind::Queen, Position::new(1, 1), 4));

    let mut engine = Engine::new(4)?;

    // Place a known solution
    for (x, y) in [(0, 1), (1, 3), (2, 0), (3, 2)] {
        let result = engine.place(FigureKind::Queen, Position::new(x, y))?;
        println!(
            "Placed queen on ({}, {}); {} squares threatened",
            x,
            y,
            result.threats.threatened_count()
        );
    }
    println!("\nSolved: {}\n", engine.is_solved());

    // An attacking placement is refused and leaves the board as it was
    engine.remove(Position::new(3, 2));
    match engine.place(FigureKind::Queen, Position::new(3, 3)) {
        Err(PlacementError::Invalid(pos)) => println!("Queen on {} would be attacked", pos),
        other => println!("Unexpected: {:?}", other),
    }

    println!("\nOccupied squares: {:?}", engine.occupied_positions());
    print!("{}", engine.threat_matrix());

    Ok(())
}
