use crate::policy::RegisterPolicy;
use crate::register::{DefaultRegister, Register};
use crate::Float4;

crate::packed_vector! {
    /// A column-major 4x4 matrix spanning four aligned registers, one per column.
    ///
    /// `*` between two matrices is elementwise; use [`Float4x4::matmul`] for
    /// the matrix product.
    pub struct Float4x4 { rows: 4, columns: 4, column_align: 16, align: 32, storage: 16 }
}

type P = RegisterPolicy<Float4x4>;

impl Float4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self =
        Self::from_columns([Float4::RIGHT, Float4::UP, Float4::FORWARD, Float4::IN]);

    /// Builds a matrix from its four columns.
    pub const fn from_columns(columns: [Float4; 4]) -> Self {
        let mut data = [0.0; 16];
        let mut c = 0;
        while c < 4 {
            let column = columns[c].to_array();
            let mut r = 0;
            while r < 4 {
                data[c * 4 + r] = column[r];
                r += 1;
            }
            c += 1;
        }
        Self { data }
    }

    /// Builds a matrix from its four rows.
    pub fn from_rows(rows: [Float4; 4]) -> Self {
        Self::from_columns(rows).transpose()
    }

    /// Column `index`.
    ///
    /// # Panics
    ///
    /// If `index >= 4`.
    #[inline]
    pub fn column(&self, index: usize) -> Float4 {
        Float4::from_register(P::load_chunk(self, index))
    }

    /// Replaces column `index`.
    ///
    /// # Panics
    ///
    /// If `index >= 4`.
    #[inline]
    pub fn set_column(&mut self, index: usize, column: Float4) {
        P::store_chunk(self, index, column.to_register());
    }

    /// Row `index`.
    ///
    /// # Panics
    ///
    /// If `index >= 4`.
    pub fn row(&self, index: usize) -> Float4 {
        assert!(index < 4, "row index out of bounds");
        Float4::from_array(core::array::from_fn(|c| self.data[c * 4 + index]))
    }

    /// The element at `row`, `col`.
    ///
    /// # Panics
    ///
    /// If either index is `>= 4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "matrix index out of bounds");
        self.data[col * 4 + row]
    }

    /// Sets the element at `row`, `col`.
    ///
    /// # Panics
    ///
    /// If either index is `>= 4`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < 4 && col < 4, "matrix index out of bounds");
        self.data[col * 4 + row] = value;
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_array(core::array::from_fn(|i| self.data[(i % 4) * 4 + i / 4]))
    }

    /// Linear combination of this matrix's columns weighted by `weights`.
    #[inline(always)]
    fn combine(columns: &[DefaultRegister; 4], weights: [f32; 4]) -> DefaultRegister {
        let first = columns[0].mul(DefaultRegister::splat(weights[0]));
        columns
            .iter()
            .zip(weights)
            .skip(1)
            .fold(first, |acc, (column, weight)| {
                column.mul_add(DefaultRegister::splat(weight), acc)
            })
    }

    /// Matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Self) -> Self {
        let columns = core::array::from_fn(|c| P::load_chunk(self, c));
        let mut out = Self::ZERO;
        for c in 0..4 {
            P::store_chunk(&mut out, c, Self::combine(&columns, rhs.column(c).to_array()));
        }
        out
    }

    /// Matrix-vector product `self * rhs`.
    pub fn mul_vector(&self, rhs: &Float4) -> Float4 {
        let columns = core::array::from_fn(|c| P::load_chunk(self, c));
        Float4::from_register(Self::combine(&columns, rhs.to_array()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> Float4x4 {
        Float4x4::from_array(core::array::from_fn(|i| i as f32 + 1.0))
    }

    #[test]
    fn layout_is_column_major() {
        let m = sequence();
        assert_eq!(m.column(1), Float4::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(m.row(1), Float4::new(2.0, 6.0, 10.0, 14.0));
        assert_eq!(m.get(2, 3), 15.0);
        assert_eq!(m[14], 15.0);
        assert_eq!(Float4x4::from_rows([m.row(0), m.row(1), m.row(2), m.row(3)]), m);
    }

    #[test]
    fn columns_round_trip() {
        let mut m = Float4x4::ZERO;
        m.set_column(2, Float4::ONE);
        m.set(0, 0, 3.0);
        assert_eq!(m.column(2), Float4::ONE);
        assert_eq!(m.get(0, 0), 3.0);
        assert_eq!(m.sum(), 7.0);
    }

    #[test]
    fn transpose_twice() {
        let m = sequence();
        assert_eq!(m.transpose().get(3, 0), m.get(0, 3));
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(Float4x4::IDENTITY.transpose(), Float4x4::IDENTITY);
    }

    #[test]
    fn products() {
        let m = sequence();
        assert_eq!(Float4x4::IDENTITY.matmul(&m), m);
        assert_eq!(m.matmul(&Float4x4::IDENTITY), m);

        let v = Float4::new(1.0, 0.0, 0.0, 1.0);
        // column 0 plus column 3
        assert_eq!(m.mul_vector(&v), Float4::new(14.0, 16.0, 18.0, 20.0));

        let twice = m.matmul(&(Float4x4::IDENTITY * 2.0));
        assert_eq!(twice, m * 2.0);

        // (m * m) column 0 = m * m.column(0)
        let square = m.matmul(&m);
        assert_eq!(square.column(0), m.mul_vector(&m.column(0)));
        assert_eq!(square.get(0, 0), 90.0);
    }

    #[test]
    fn elementwise_and_fast_division() {
        let m = sequence();
        assert_eq!((m - m).sum(), 0.0);
        assert_eq!((m * m).get(3, 3), 256.0);
        let d = m.fast_div_scalar(2.0);
        assert!(d.approx_eq(&(m / 2.0), 16.0 * crate::APPROX_EPSILON));
        assert!(m.simd_gt(&Float4x4::splat(8.5)).to_u32() == 0xff00);
    }
}
