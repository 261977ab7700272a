/// Fuzzes the search engine by checking for many random grids that every strategy finds a path
/// exactly when the goal shares a connected component with the start, that the paths are
/// valid, and that the optimal strategies agree on their length.
use grid_search::path::is_contiguous;
use grid_search::{Grid, GridConfig, Point, Strategy};
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> Grid {
    let config = GridConfig {
        width: w,
        height: h,
        passable_probability: 0.6,
    };
    Grid::random(&config, rng).unwrap()
}

/// Reopens the corners so that they can serve as start and goal.
fn with_open_corners(grid: &Grid) -> Grid {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let cells = grid.cells().map(|c| {
        let corner = (c.position.x == 0 && c.position.y == 0)
            || (c.position.x == w - 1 && c.position.y == h - 1);
        (c.position, c.passable || corner)
    });
    Grid::from_cells(grid.width(), grid.height(), cells).unwrap()
}

fn visualize_grid(grid: &Grid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !grid.is_passable(&p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = with_open_corners(&random_grid(N, N, &mut rng));
        let reachable = grid.reachable(&start, &end);
        for strategy in Strategy::ALL {
            let visited = strategy.explore(&grid, start, end).unwrap();
            // Show the grid if the outcome disagrees with the components
            if visited.is_empty() == reachable {
                println!("{strategy} disagrees with components");
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(!visited.is_empty(), reachable);
            if reachable {
                assert_eq!(visited.last().unwrap().position, end);
                let path = grid_search::path::reconstruct_path(&visited);
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(is_contiguous(&path));
                assert!(path.iter().all(|p| grid.is_passable(p)));
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = with_open_corners(&random_grid(N, N, &mut rng));
        if !grid.reachable(&start, &end) {
            continue;
        }
        let length = |strategy: Strategy| {
            let visited = strategy.explore(&grid, start, end).unwrap();
            grid_search::path::reconstruct_path(&visited).len()
        };
        let bfs = length(Strategy::Breadth);
        let dijkstra = length(Strategy::Dijkstra);
        let astar = length(Strategy::AStar);
        let greedy = length(Strategy::Greedy);
        if astar != dijkstra || bfs != dijkstra || greedy < dijkstra {
            println!("bfs: {bfs}; dijkstra: {dijkstra}; astar: {astar}; greedy: {greedy}");
            visualize_grid(&grid, &start, &end);
        }
        assert_eq!(astar, dijkstra);
        assert_eq!(bfs, dijkstra);
        assert!(greedy >= dijkstra);
    }
}

#[test]
fn fuzz_idempotent() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let grid = random_grid(12, 9, &mut rng);
        let open: Vec<Point> = grid
            .cells()
            .filter(|c| c.passable)
            .map(|c| c.position)
            .collect();
        if open.len() < 2 {
            continue;
        }
        let start = *open.choose(&mut rng).unwrap();
        let goal = *open.choose(&mut rng).unwrap();
        for strategy in Strategy::ALL {
            let first = strategy.explore(&grid, start, goal).unwrap();
            let second = strategy.explore(&grid, start, goal).unwrap();
            assert_eq!(first, second);
        }
    }
}
