//! Unit tests for gp-core primitives.

#[cfg(test)]
mod ids {
    use crate::CellId;

    #[test]
    fn index_roundtrip() {
        let id = CellId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CellId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_default() {
        assert_eq!(CellId::INVALID.0, u32::MAX);
        assert_eq!(CellId::default(), CellId::INVALID);
        assert!(!CellId::INVALID.is_valid());
        assert!(CellId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(CellId(7).to_string(), "CellId(7)");
    }
}

#[cfg(test)]
mod coord {
    use crate::Coord;

    #[test]
    fn manhattan_ignores_z() {
        let a = Coord { x: 0, y: 0, z: 0 };
        let b = Coord { x: 3, y: -4, z: 9 };
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
    }

    #[test]
    fn adjacency_is_one_axis_step() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn neighbors4_order() {
        let n = Coord::new(1, 1).neighbors4();
        assert_eq!(n, [
            Coord::new(2, 1),
            Coord::new(0, 1),
            Coord::new(1, 2),
            Coord::new(1, 0),
        ]);
    }
}

#[cfg(test)]
mod cell {
    use crate::{edge_cost, CellState, UNREACHABLE};

    #[test]
    fn char_roundtrip() {
        for s in [CellState::Free, CellState::Source, CellState::Destination, CellState::Blocked] {
            assert_eq!(CellState::from_char(s.as_char()), Some(s));
        }
        assert_eq!(CellState::from_char('x'), None);
    }

    #[test]
    fn blocked_endpoint_forbids_edge() {
        assert_eq!(edge_cost(CellState::Free, CellState::Free), 1.0);
        assert_eq!(edge_cost(CellState::Source, CellState::Destination), 1.0);
        assert_eq!(edge_cost(CellState::Blocked, CellState::Free), UNREACHABLE);
        assert_eq!(edge_cost(CellState::Free, CellState::Blocked), UNREACHABLE);
    }
}

#[cfg(test)]
mod graph {
    use crate::{CellState, Coord, CoreError, GridGraphBuilder, UNREACHABLE};

    #[test]
    fn empty_build() {
        let g = GridGraphBuilder::new().build();
        assert_eq!(g.cell_count(), 0);
        assert_eq!(g.link_count(), 0);
        assert!(g.is_empty());
        assert!(g.is_symmetric());
    }

    #[test]
    fn csr_neighbors() {
        let mut b = GridGraphBuilder::new();
        let a = b.add_cell(Coord::new(0, 0), CellState::Free);
        let c = b.add_cell(Coord::new(1, 0), CellState::Free);
        let d = b.add_cell(Coord::new(2, 0), CellState::Free);
        b.add_link(a, c);
        b.add_link(c, d);
        let g = b.build();

        assert_eq!(g.neighbors(a), &[c]);
        assert_eq!(g.neighbors(c), &[a, d]);
        assert_eq!(g.degree(d), 1);
        assert!(g.is_symmetric());
    }

    #[test]
    fn duplicate_coord_reuses_id() {
        let mut b = GridGraphBuilder::new();
        let a = b.add_cell(Coord::new(4, 4), CellState::Free);
        let again = b.add_cell(Coord::new(4, 4), CellState::Blocked);
        assert_eq!(a, again);
        let g = b.build();
        assert_eq!(g.cell_count(), 1);
        assert_eq!(g.state(a), CellState::Blocked);
    }

    #[test]
    fn lookup_missing_coord_fails() {
        let g = GridGraphBuilder::new().build();
        let err = g.lookup(Coord::new(1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::CellNotFound(c) if c == Coord::new(1, 1)));
    }

    #[test]
    fn set_state_changes_edge_cost() {
        let mut b = GridGraphBuilder::new();
        let a = b.add_cell(Coord::new(0, 0), CellState::Free);
        let c = b.add_cell(Coord::new(0, 1), CellState::Free);
        b.add_link(a, c);
        let mut g = b.build();

        assert_eq!(g.edge_cost(a, c), 1.0);
        let old = g.set_state(c, CellState::Blocked);
        assert_eq!(old, CellState::Free);
        assert_eq!(g.edge_cost(a, c), UNREACHABLE);
        assert_eq!(g.edge_cost(c, a), UNREACHABLE);
    }

    #[test]
    fn asymmetric_graph_is_reported_not_repaired() {
        let mut b = GridGraphBuilder::new();
        let a = b.add_cell(Coord::new(0, 0), CellState::Free);
        let c = b.add_cell(Coord::new(1, 0), CellState::Free);
        b.add_directed_link(a, c);
        let g = b.build();

        assert!(!g.is_symmetric());
        assert_eq!(g.first_asymmetric_link(), Some((a, c)));
        // Still one-way after the check.
        assert_eq!(g.neighbors(a), &[c]);
        assert!(g.neighbors(c).is_empty());
    }
}

#[cfg(test)]
mod grid {
    use crate::{CellId, CellState, Coord, CoreError, Grid};

    const MAZE: &str = "
        S..#.
        .#.#.
        .#..D
    ";

    #[test]
    fn parse_dimensions_and_markers() {
        let grid = Grid::parse(MAZE).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.source(), Some(Coord::new(0, 0)));
        assert_eq!(grid.destination(), Some(Coord::new(4, 2)));
        assert_eq!(grid.count(CellState::Blocked), 4);
        assert_eq!(grid.get(Coord::new(3, 0)).unwrap(), CellState::Blocked);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse("...\n..\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn parse_rejects_unknown_char() {
        let err = Grid::parse("..x\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(msg) if msg.contains("'x'")));
    }

    #[test]
    fn render_roundtrips_parse() {
        let grid = Grid::parse(MAZE).unwrap();
        assert_eq!(Grid::parse(&grid.render()).unwrap(), grid);
    }

    #[test]
    fn render_path_overlays_free_cells_only() {
        let grid = Grid::parse("S.D\n").unwrap();
        let path = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
        assert_eq!(grid.render_path(&path), "S*D\n");
    }

    #[test]
    fn set_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        let err = grid.set(Coord::new(2, 0), CellState::Blocked).unwrap_err();
        assert!(matches!(err, CoreError::OutOfBounds { x: 2, y: 0, .. }));
    }

    #[test]
    fn scatter_walls_is_deterministic_and_spares_markers() {
        let mut a = Grid::new(20, 20);
        a.set(Coord::new(0, 0), CellState::Source).unwrap();
        a.set(Coord::new(19, 19), CellState::Destination).unwrap();
        let mut b = a.clone();

        let placed = a.scatter_walls(0.3, 7);
        b.scatter_walls(0.3, 7);
        assert_eq!(a, b);
        assert_eq!(a.count(CellState::Blocked), placed);
        assert!(placed > 0 && placed < 400);
        assert_eq!(a.source(), Some(Coord::new(0, 0)));
        assert_eq!(a.destination(), Some(Coord::new(19, 19)));
    }

    #[test]
    fn build_graph_four_neighbourhood() {
        let grid = Grid::new(3, 3);
        let g = grid.build_graph();
        assert_eq!(g.cell_count(), 9);
        // 12 undirected links in a 3x3 lattice, stored both ways.
        assert_eq!(g.link_count(), 24);
        assert!(g.is_symmetric());

        let centre = g.lookup(Coord::new(1, 1)).unwrap();
        assert_eq!(g.degree(centre), 4);
        let corner = g.lookup(Coord::new(0, 0)).unwrap();
        assert_eq!(corner, CellId(0));
        assert_eq!(g.degree(corner), 2);
        for &n in g.neighbors(centre) {
            assert!(g.coord(n).is_adjacent(Coord::new(1, 1)));
        }
    }

    #[test]
    fn build_graph_keeps_wall_cells() {
        let grid = Grid::parse(MAZE).unwrap();
        let g = grid.build_graph();
        let wall = g.lookup(Coord::new(1, 1)).unwrap();
        assert_eq!(g.state(wall), CellState::Blocked);
        assert_eq!(g.degree(wall), 4);
        assert_eq!(g.find_state(CellState::Destination), g.cell_at(Coord::new(4, 2)));
    }
}
