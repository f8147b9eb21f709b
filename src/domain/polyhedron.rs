/// Inclusive (lower, upper) bound of an integer column, same layout as `glpk_rust::Bound`.
pub type Bound = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Binary,
    Integer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Opaque solver-facing name; decoding never parses it
    pub id: String,
    pub kind: VariableKind,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape {
    pub nrows: usize,
    pub ncols: usize,
}

/// Coordinate-format integer matrix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegerSparseMatrix {
    pub rows: Vec<i32>,
    pub cols: Vec<i32>,
    pub vals: Vec<i32>,
    pub shape: Shape,
}

/// Minimize `objective · x` subject to `a x <= b` and the variable bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyhedron {
    pub a: IntegerSparseMatrix,
    pub b: Vec<i32>,
    pub variables: Vec<Variable>,
    /// One coefficient per variable
    pub objective: Vec<f64>,
}

impl Polyhedron {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column and returns its index.
    pub fn add_variable(&mut self, kind: VariableKind, bound: Bound, cost: f64) -> usize {
        let col = self.variables.len();
        self.variables.push(Variable {
            id: format!("x{}", col),
            kind,
            bound,
        });
        self.objective.push(cost);
        self.a.shape.ncols = self.variables.len();
        col
    }

    /// Appends the row `Σ coeff · x[col] <= rhs` and returns its index.
    ///
    /// Rows without entries are kept so that `0 <= rhs` still constrains the model.
    pub fn add_row(&mut self, entries: &[(usize, i32)], rhs: i32) -> usize {
        let row = self.b.len();
        for &(col, val) in entries {
            if val == 0 {
                continue;
            }
            self.a.rows.push(row as i32);
            self.a.cols.push(col as i32);
            self.a.vals.push(val);
        }
        self.b.push(rhs);
        self.a.shape.nrows = self.b.len();
        row
    }

    pub fn nrows(&self) -> usize {
        self.a.shape.nrows
    }

    pub fn ncols(&self) -> usize {
        self.a.shape.ncols
    }

    /// Entries grouped per row as `(col, val)`.
    pub fn row_entries(&self) -> Vec<Vec<(usize, f64)>> {
        let mut row_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.nrows()];
        for i in 0..self.a.vals.len() {
            let row = self.a.rows[i] as usize;
            let col = self.a.cols[i] as usize;
            row_data[row].push((col, self.a.vals[i] as f64));
        }
        row_data
    }

    /// Entries grouped per column as `(row, val)`.
    pub fn column_entries(&self) -> Vec<Vec<(usize, f64)>> {
        let mut col_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.ncols()];
        for i in 0..self.a.vals.len() {
            let row = self.a.rows[i] as usize;
            let col = self.a.cols[i] as usize;
            col_data[col].push((row, self.a.vals[i] as f64));
        }
        col_data
    }

    /// True when some row reads `0 <= rhs` with a negative `rhs`.
    pub fn trivially_infeasible(&self) -> bool {
        let mut has_entries = vec![false; self.nrows()];
        for &row in &self.a.rows {
            has_entries[row as usize] = true;
        }
        self.b
            .iter()
            .zip(has_entries)
            .any(|(&rhs, filled)| !filled && rhs < 0)
    }

    /// Objective value of an assignment.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_row_skips_zero_coefficients() {
        let mut p = Polyhedron::new();
        let x = p.add_variable(VariableKind::Integer, (0, 5), 1.0);
        let y = p.add_variable(VariableKind::Binary, (0, 1), 2.0);
        p.add_row(&[(x, 1), (y, 0)], 3);

        assert_eq!(p.a.vals, vec![1]);
        assert_eq!(p.a.shape, Shape { nrows: 1, ncols: 2 });
        assert_eq!(p.variables[1].id, "x1");
    }

    #[test]
    fn test_row_and_column_entries() {
        let mut p = Polyhedron::new();
        let x = p.add_variable(VariableKind::Integer, (0, 5), 1.0);
        let y = p.add_variable(VariableKind::Integer, (0, 5), 1.0);
        p.add_row(&[(x, 1), (y, -2)], 0);
        p.add_row(&[(y, 3)], 4);

        assert_eq!(p.row_entries(), vec![vec![(0, 1.0), (1, -2.0)], vec![(1, 3.0)]]);
        assert_eq!(p.column_entries(), vec![vec![(0, 1.0)], vec![(0, -2.0), (1, 3.0)]]);
    }

    #[test]
    fn test_trivially_infeasible_detects_empty_row_with_negative_rhs() {
        let mut p = Polyhedron::new();
        let x = p.add_variable(VariableKind::Integer, (0, 5), 1.0);
        p.add_row(&[(x, -1)], -2);
        assert!(!p.trivially_infeasible());

        p.add_row(&[], 0);
        assert!(!p.trivially_infeasible());

        p.add_row(&[], -1);
        assert!(p.trivially_infeasible());
    }

    #[test]
    fn test_evaluate() {
        let mut p = Polyhedron::new();
        p.add_variable(VariableKind::Binary, (0, 1), 10.0);
        p.add_variable(VariableKind::Integer, (0, 3), 2.5);
        assert_eq!(p.evaluate(&[1.0, 2.0]), 15.0);
    }
}
