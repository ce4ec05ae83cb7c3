#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::component::{Component, Exploration, ExplorationState};
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::error::{MalformedGrid, QueryError};
    use crate::grid::Grid;
    use crate::index::CellIndex;
    use crate::path::Path;
    use crate::request::{Operation, Request, Response};
    use crate::step::Step;
    use crate::submarine;
    use crate::view::GridView;
    use crate::weighted::LightestPathSearch;

    fn engine() -> Engine {
        Engine::new(EngineConfig::with_workers(4))
    }

    fn component(cells: &[(usize, usize)]) -> Component {
        cells.iter().map(|&(r, c)| CellIndex(r, c)).collect()
    }

    fn path(cells: &[(usize, usize)]) -> Path {
        Path::from(cells.iter().map(|&(r, c)| CellIndex(r, c)).collect_vec())
    }

    #[test]
    fn reject_malformed_grids() {
        let empty: Vec<Vec<i32>> = vec![];
        assert_eq!(Grid::from_rows(&empty), Err(MalformedGrid::NoRows));
        assert_eq!(Grid::from_rows(&[Vec::<i32>::new()]), Err(MalformedGrid::NoColumns));
        assert_eq!(
            Grid::from_rows(&[vec![1, 0, 1], vec![1, 0]]),
            Err(MalformedGrid::Ragged { row: 1, expected: 3, found: 2 }),
        );
    }

    #[test]
    fn grid_copies_its_input() {
        let mut rows = vec![vec![1, 0], vec![0, 1]];
        let grid = Grid::from_rows(&rows).unwrap();
        rows[0][0] = 0;

        assert_eq!(grid.value_at(CellIndex(0, 0)), Ok(1));
        assert_eq!(format!("{}", grid), "[1, 0]
[0, 1]
");
    }

    #[test]
    fn neighbors_at_edges_and_corners() {
        let grid = Grid::from_rows(&[[0; 4]; 3]).unwrap();

        assert_eq!(grid.neighbors(CellIndex(0, 0)), vec![CellIndex(1, 1), CellIndex(1, 0), CellIndex(0, 1)]);
        assert_eq!(grid.neighbors(CellIndex(0, 2)).len(), 5);
        assert_eq!(grid.neighbors(CellIndex(1, 1)).len(), 8);
        assert_eq!(grid.neighbors(CellIndex(2, 3)).len(), 3);
        assert!(grid.value_at(CellIndex(3, 0)).is_err());
    }

    #[test]
    fn reachable_includes_self_and_occupied_only() {
        let grid = Grid::from_rows(&[
            [1, 0, 0],
            [1, 0, 1],
            [0, 1, 1],
        ]).unwrap();

        assert_eq!(grid.occupied_indices(), vec![CellIndex(0, 0), CellIndex(1, 0), CellIndex(1, 2), CellIndex(2, 1), CellIndex(2, 2)]);
        assert_eq!(grid.reachable_from(CellIndex(0, 1)), Ok(vec![]));
        assert_eq!(grid.reachable_from(CellIndex(2, 2)), Ok(vec![CellIndex(2, 2), CellIndex(1, 2), CellIndex(2, 1)]));
        assert_eq!(
            grid.reachable_from(CellIndex(5, 5)),
            Err(QueryError::OutOfBounds { index: CellIndex(5, 5), rows: 3, columns: 3 }),
        );
    }

    #[test]
    fn steps_invert_and_locate() {
        let a = CellIndex(2, 2);
        for step in [Step::UpLeft, Step::Down, Step::Right, Step::DownLeft] {
            let b = step.attempt_from(a);
            assert_eq!(Step::between(a, b), Some(step));
            assert_eq!(Step::between(b, a), Some(step.invert()));
        }
        assert_eq!(Step::between(a, CellIndex(4, 2)), None);
        assert_eq!(Step::between(a, a), None);
    }

    #[test]
    fn view_endpoints_are_bounds_checked() {
        let grid = Grid::from_rows(&[[1, 1], [1, 1]]).unwrap();
        let mut view = GridView::new(&grid);

        assert_eq!(view.root(), CellIndex(0, 0));
        assert_eq!(view.destination(), Err(QueryError::DestinationUnset));
        assert!(matches!(view.set_source(CellIndex(2, 0)), Err(QueryError::OutOfBounds { .. })));
        assert_eq!(view.source(), CellIndex(0, 0));

        view.set_source(CellIndex(1, 1)).unwrap().set_destination(CellIndex(0, 1)).unwrap();
        assert_eq!(view.root(), CellIndex(1, 1));
        assert_eq!(view.destination(), Ok(CellIndex(0, 1)));
        assert!(GridView::with_endpoints(&grid, CellIndex(0, 0), CellIndex(0, 2)).is_err());
    }

    #[test]
    fn exploration_walks_through_states() {
        let grid = Grid::from_rows(&[
            [1, 0, 0],
            [1, 0, 1],
            [0, 1, 1],
        ]).unwrap();
        let mut exploration = Exploration::new(GridView::with_source(&grid, CellIndex(2, 2)).unwrap());

        assert_eq!(exploration.state(), ExplorationState::Idle);
        assert_eq!(exploration.step(), Ok(ExplorationState::Exploring));
        while exploration.step().unwrap() != ExplorationState::Done {}
        assert_eq!(exploration.step(), Ok(ExplorationState::Done));
        // (1, 0) and (2, 1) touch diagonally
        assert_eq!(exploration.into_component(), component(&[(0, 0), (1, 0), (1, 2), (2, 1), (2, 2)]));
    }

    #[test]
    fn components_small() {
        let grid = Grid::from_rows(&[
            [1, 0, 0],
            [1, 0, 1],
            [0, 0, 1],
        ]).unwrap();

        let components = engine().components(&grid).unwrap();
        assert_eq!(components, vec![
            component(&[(0, 0), (1, 0)]),
            component(&[(1, 2), (2, 2)]),
        ]);

        let first = components[0].bounds().unwrap();
        assert_eq!((first.top, first.left, first.bottom, first.right), (0, 0, 1, 0));
        assert_eq!(first.area(), 2);
        assert_eq!(submarine::count_submarines(&components, &grid), Ok(2));
    }

    #[test]
    fn components_join_diagonally() {
        let grid = Grid::from_rows(&[
            [1, 0, 0],
            [1, 0, 1],
            [0, 1, 1],
        ]).unwrap();

        let components = engine().components(&grid).unwrap();
        assert_eq!(components, vec![component(&[(0, 0), (1, 0), (1, 2), (2, 1), (2, 2)])]);
        // the bounding rectangle is the whole grid, holes included
        assert_eq!(engine().count_submarines(&grid), Ok(0));
    }

    #[test]
    fn components_independent_of_worker_count() {
        let grid = Grid::from_rows(&[
            [1, 0, 0, 1, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 0, 0, 0, 0, 1, 0, 0],
            [0, 0, 0, 0, 0, 1, 0, 0, 1, 0],
            [0, 0, 1, 0, 1, 1, 0, 0, 0, 0],
            [0, 1, 1, 0, 0, 1, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 1, 0, 0, 0, 0],
            [0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
            [0, 0, 1, 0, 0, 1, 0, 0, 0, 0],
            [1, 0, 1, 0, 0, 1, 0, 1, 1, 1],
            [1, 0, 1, 0, 0, 1, 0, 0, 1, 1],
        ]).unwrap();

        let serial = Engine::new(EngineConfig::with_workers(1)).components(&grid).unwrap();
        let parallel = Engine::new(EngineConfig::with_workers(8)).components(&grid).unwrap();
        assert_eq!(serial, parallel);
        assert!(serial.iter().tuple_windows().all(|(a, b)| a.len() <= b.len()));

        let covered = serial.iter().map(Component::len).sum::<usize>();
        assert_eq!(covered, grid.occupied_indices().len());
    }

    #[test]
    fn submarines_three() {
        let grid = Grid::from_rows(&[
            [1, 1, 0, 1, 1],
            [0, 0, 0, 1, 1],
            [1, 1, 0, 0, 0],
            [1, 1, 0, 0, 0],
        ]).unwrap();

        assert_eq!(engine().count_submarines(&grid), Ok(3));
    }

    #[test]
    fn submarines_various() {
        let one_l_shape = Grid::from_rows(&[
            [1, 1, 0, 1, 1],
            [1, 0, 0, 1, 1],
            [1, 0, 0, 1, 1],
        ]).unwrap();
        let one_diagonal = Grid::from_rows(&[
            [1, 0, 0, 1, 1],
            [1, 0, 0, 1, 1],
            [0, 1, 0, 1, 1],
        ]).unwrap();
        let two_columns = Grid::from_rows(&[
            [1, 0, 1, 1],
            [1, 0, 1, 1],
            [1, 0, 1, 1],
        ]).unwrap();
        let singletons = Grid::from_rows(&[
            [1, 0, 1],
            [0, 0, 0],
            [1, 0, 1],
        ]).unwrap();

        assert_eq!(engine().count_submarines(&one_l_shape), Ok(1));
        assert_eq!(engine().count_submarines(&one_diagonal), Ok(1));
        assert_eq!(engine().count_submarines(&two_columns), Ok(2));
        assert_eq!(engine().count_submarines(&singletons), Ok(0));

        let components = engine().components(&two_columns).unwrap();
        let accepted = submarine::submarines(&components, &two_columns).unwrap();
        assert_eq!(accepted, vec![&component(&[(0, 0), (1, 0), (2, 0)]), &components[1]]);
    }

    #[test]
    fn shortest_path_ties() {
        let grid = Grid::from_rows(&[
            [1, 0, 0],
            [1, 1, 0],
            [1, 1, 0],
        ]).unwrap();

        let paths = engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(2, 0)).unwrap();
        assert_eq!(paths.iter().map(|p| format!("{}", p)).collect_vec(), vec![
            "(0, 0) -> (1, 1) -> (2, 0)",
            "(0, 0) -> (1, 0) -> (2, 0)",
        ]);
    }

    #[test]
    fn shortest_path_large() {
        let grid = Grid::from_rows(&[
            [1, 0, 1, 1, 1, 1, 0, 0, 0, 0],
            [0, 1, 1, 1, 1, 1, 0, 0, 0, 0],
            [0, 1, 1, 1, 0, 1, 0, 0, 0, 0],
            [0, 0, 1, 0, 1, 1, 0, 1, 0, 0],
            [0, 1, 1, 0, 0, 1, 0, 0, 0, 0],
            [1, 0, 1, 0, 0, 1, 0, 0, 0, 0],
            [0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
            [0, 0, 1, 0, 0, 1, 1, 0, 0, 0],
            [0, 0, 1, 0, 0, 1, 0, 1, 1, 1],
            [1, 0, 1, 0, 0, 1, 0, 0, 1, 1],
        ]).unwrap();
        let (source, destination) = (CellIndex(0, 0), CellIndex(9, 2));

        let paths = engine().shortest_paths(&grid, source, destination).unwrap();
        assert_eq!(paths.len(), 4);
        for path in &paths {
            assert_eq!(path.len(), 10);
            assert_eq!(path.source(), Some(source));
            assert_eq!(path.last(), Some(destination));
            assert!(path.is_simple());
            assert!(path.is_connected());
            assert!(path.into_iter().all(|index| grid.value_at(*index) == Ok(1)));
        }
        assert!(paths.iter().all_unique());
    }

    #[test]
    fn shortest_path_degenerate() {
        let grid = Grid::from_rows(&[
            [1, 0, 1],
            [0, 0, 0],
            [1, 1, 0],
        ]).unwrap();

        // source equals destination
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 2), CellIndex(0, 2)), Ok(vec![path(&[(0, 2)])]));
        // vacant endpoint
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 1), CellIndex(0, 2)), Ok(vec![]));
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(1, 1)), Ok(vec![]));
        // separate components
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(2, 1)), Ok(vec![]));
        // out of bounds
        assert!(matches!(
            engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(3, 0)),
            Err(QueryError::OutOfBounds { .. }),
        ));
    }

    #[test]
    fn shortest_path_only_steps_on_occupied_cells() {
        let grid = Grid::from_rows(&[
            [2, 1],
            [0, 1],
        ]).unwrap();

        assert_eq!(grid.reachable_from(CellIndex(0, 0)), Ok(vec![]));
        assert_eq!(grid.reachable_from(CellIndex(1, 1)), Ok(vec![CellIndex(1, 1), CellIndex(0, 1)]));
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(1, 1)), Ok(vec![]));
        assert_eq!(engine().shortest_paths(&grid, CellIndex(1, 1), CellIndex(0, 0)), Ok(vec![]));
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 1), CellIndex(1, 1)), Ok(vec![path(&[(0, 1), (1, 1)])]));
        // nothing to step through
        assert_eq!(engine().shortest_paths(&grid, CellIndex(0, 0), CellIndex(0, 0)), Ok(vec![path(&[(0, 0)])]));

        let detour = Grid::from_rows(&[
            [1, 3, 1],
            [1, 0, 1],
            [1, 1, 1],
        ]).unwrap();
        assert_eq!(
            engine().shortest_paths(&detour, CellIndex(0, 0), CellIndex(0, 2)),
            Ok(vec![path(&[(0, 0), (1, 0), (2, 1), (1, 2), (0, 2)])]),
        );
        assert_eq!(engine().components(&detour).unwrap().len(), 1);
    }

    #[test]
    fn lightest_path_unique() {
        let grid = Grid::from_rows(&[
            [100, 100, 100],
            [500, 900, 300],
            [400, 150, 200],
        ]).unwrap();

        let paths = engine().lightest_paths(&grid, CellIndex(0, 0), CellIndex(2, 2)).unwrap();
        assert_eq!(paths, vec![path(&[(0, 0), (0, 1), (1, 2), (2, 2)])]);
        assert_eq!(paths[0].weight(&grid), Ok(700));

        let paths = engine().lightest_paths(&grid, CellIndex(2, 0), CellIndex(0, 2)).unwrap();
        assert_eq!(paths, vec![path(&[(2, 0), (2, 1), (1, 2), (0, 2)])]);
        assert_eq!(paths[0].weight(&grid), Ok(950));
    }

    #[test]
    fn lightest_path_ties() {
        let grid = Grid::from_rows(&[
            [100, 100, 100],
            [100, 600, 100],
            [100, 100, 100],
        ]).unwrap();

        let paths = engine().lightest_paths(&grid, CellIndex(0, 0), CellIndex(2, 2)).unwrap();
        assert_eq!(paths.into_iter().sorted().collect_vec(), vec![
            path(&[(0, 0), (0, 1), (1, 2), (2, 2)]),
            path(&[(0, 0), (1, 0), (2, 1), (2, 2)]),
        ]);
    }

    #[test]
    fn lightest_path_crosses_vacant_cells() {
        let grid = Grid::from_rows(&[
            [5, 0, 0, 5],
            [9, 9, 9, 9],
        ]).unwrap();

        let paths = engine().lightest_paths(&grid, CellIndex(0, 0), CellIndex(0, 3)).unwrap();
        assert_eq!(paths, vec![path(&[(0, 0), (0, 1), (0, 2), (0, 3)])]);

        // vacant endpoints
        assert_eq!(engine().lightest_paths(&grid, CellIndex(0, 1), CellIndex(0, 3)), Ok(vec![]));
        assert_eq!(engine().lightest_paths(&grid, CellIndex(0, 0), CellIndex(0, 2)), Ok(vec![]));
        // source equals destination
        assert_eq!(engine().lightest_paths(&grid, CellIndex(1, 1), CellIndex(1, 1)), Ok(vec![path(&[(1, 1)])]));
    }

    #[test]
    fn lightest_path_enumerates_every_simple_path() {
        for (rows, columns, expected) in [(2, 2, 5), (2, 3, 24), (3, 3, 235)] {
            let grid = Grid::from_rows(&vec![vec![1; columns]; rows]).unwrap();
            let view = GridView::with_endpoints(&grid, CellIndex(0, 0), CellIndex(rows - 1, columns - 1)).unwrap();
            let paths = LightestPathSearch::from(view).all_paths().unwrap();

            assert_eq!(paths.len(), expected, "on a {}x{} grid", rows, columns);
            assert!(paths.iter().all_unique());
            assert!(paths.iter().all(|path| path.is_simple() && path.is_connected()));
        }
    }

    #[test]
    fn handle_requests() {
        let request: Request = serde_json::from_str(r#"{
            "operation": "count-shapes",
            "grid": [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 1]]
        }"#).unwrap();
        assert_eq!(request.operation(), Operation::CountShapes);
        assert_eq!(engine().handle(&request), Ok(Response::Count(1)));

        let request: Request = serde_json::from_str(r#"{
            "operation": "shortest-path",
            "grid": [[1, 0], [0, 1]],
            "source": [0, 0],
            "destination": [1, 1]
        }"#).unwrap();
        let response = engine().handle(&request).unwrap();
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"paths":[[[0,0],[1,1]]]}"#);

        let request: Request = serde_json::from_str(r#"{
            "operation": "lightest-path",
            "grid": [[1, 0], [0, 1]],
            "source": [0, 0],
            "destination": [2, 1]
        }"#).unwrap();
        assert!(matches!(engine().handle(&request), Err(QueryError::OutOfBounds { .. })));

        let response = engine().handle(&Request::Components { grid: vec![vec![1, 0, 1]] }).unwrap();
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"components":[[[0,0]],[[0,2]]]}"#);
    }

    #[test]
    fn reject_malformed_requests() {
        let ragged: Request = serde_json::from_str(r#"{"operation": "components", "grid": [[1, 1], [1]]}"#).unwrap();
        let error = engine().handle(&ragged).unwrap_err();
        assert_eq!(error, QueryError::Malformed(MalformedGrid::Ragged { row: 1, expected: 2, found: 1 }));
        assert!(error.to_string().contains("not rectangular"));
        assert!(std::error::Error::source(&error).is_some());

        let empty = Request::CountShapes { grid: vec![] };
        assert_eq!(engine().handle(&empty), Err(QueryError::Malformed(MalformedGrid::NoRows)));

        let unknown = serde_json::from_str::<Request>(r#"{"operation": "stop", "grid": [[1]]}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn operation_names() {
        assert_eq!(format!("{}", Operation::LightestPath), "lightest-path");
        assert_eq!("components".parse::<Operation>().unwrap(), Operation::Components);
        assert!("find submarines".parse::<Operation>().is_err());
    }
}
