use grid_search::{Grid, Pathfinder, Point, SearchRequest, Strategy};

// In this example every strategy searches a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = Grid::from_rows(&["...", ".#.", "..."]).expect("valid grid");
    let pathfinder = Pathfinder::new(grid);
    println!("{}", pathfinder);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    for strategy in Strategy::ALL {
        let request = SearchRequest::new(start, end).with_strategy(strategy);
        let outcome = pathfinder.search(&request).expect("valid endpoints");
        println!(
            "{strategy}: visited {} cells, path of {} cells",
            outcome.visited.len(),
            outcome.path.len()
        );
        println!("{}", pathfinder.render(&outcome));
    }
}
