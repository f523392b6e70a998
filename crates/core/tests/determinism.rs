use maze_core::{GenerationStats, MazeConfig, generate_maze};

fn config(width: i64, height: i64, imperfection: i64) -> MazeConfig {
    MazeConfig::new(width, height, imperfection).expect("valid config")
}

#[test]
fn test_determinism_identical_seeds_produce_same_fingerprint() {
    let first = generate_maze(&config(63, 47, 15), 12_345).expect("generation 1 failed");
    let second = generate_maze(&config(63, 47, 15), 12_345).expect("generation 2 failed");

    assert_eq!(
        first.maze.fingerprint(),
        second.maze.fingerprint(),
        "identical inputs must produce identical grids"
    );
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_determinism_different_seeds_produce_different_fingerprints() {
    let first = generate_maze(&config(63, 47, 15), 123).expect("generation 1 failed");
    let second = generate_maze(&config(63, 47, 15), 456).expect("generation 2 failed");

    assert_ne!(first.maze.fingerprint(), second.maze.fingerprint());
}

#[test]
fn test_same_seed_shares_the_spanning_tree_across_imperfection_levels() {
    let perfect = generate_maze(&config(31, 31, 0), 2_026).expect("perfect maze");
    for imperfection in [10, 50, 100] {
        let eroded = generate_maze(&config(31, 31, imperfection), 2_026).expect("eroded maze");
        assert_eq!(eroded.stats.tree_links, perfect.stats.tree_links);
        for pos in perfect.maze.positions() {
            if perfect.maze.is_open(pos) {
                assert!(
                    eroded.maze.is_open(pos),
                    "{pos:?} open in the perfect maze but closed at imperfection {imperfection}"
                );
            }
        }
    }
}

#[test]
fn test_raising_imperfection_never_closes_cells_for_a_fixed_seed() {
    let mut previous = generate_maze(&config(25, 17, 0), 88).expect("generation failed");
    for imperfection in (10..=100).step_by(10) {
        let next = generate_maze(&config(25, 17, imperfection), 88).expect("generation failed");
        assert!(next.maze.open_wall_count() >= previous.maze.open_wall_count());
        for pos in previous.maze.positions() {
            if previous.maze.is_open(pos) {
                assert!(next.maze.is_open(pos), "{pos:?} closed when imperfection rose");
            }
        }
        previous = next;
    }
}

#[test]
fn test_pinned_seed_reproduces_known_eroded_maze() {
    let generated = generate_maze(&config(41, 31, 25), 2_026).expect("generation failed");

    assert_eq!(generated.maze.fingerprint(), 0xd4f1_ac62_f750_df5f);
    assert_eq!(
        generated.stats,
        GenerationStats { rooms: 300, tree_links: 299, advance_steps: 599, eroded_walls: 153 }
    );
    let rendered = generated.maze.to_string();
    let mut rows = rendered.lines();
    assert_eq!(rows.next(), Some("### ## # ##  ##  #### ########  ###### ##"));
    assert_eq!(rows.last(), Some("# #### ##  ############# ######## ##### #"));
}
