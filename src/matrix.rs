//! The module matrix and the providers that produce it.
//!
//! Encoding text into QR modules (segment modes, Reed-Solomon blocks, mask
//! selection) is left to a [`MatrixProvider`]. The default provider,
//! [`QrCodeProvider`], delegates to the `qrcode` crate and always picks the
//! smallest version able to hold the content.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Error correction level passed to the matrix provider.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// Tolerates ~7% erroneous codewords.
    L,
    /// Tolerates ~15% erroneous codewords.
    M,
    /// Tolerates ~25% erroneous codewords.
    Q,
    /// Tolerates ~30% erroneous codewords.
    #[default]
    H,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(ecl: ErrorCorrection) -> Self {
        match ecl {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// A square grid of dark (`true`) and light (`false`) modules, indexed `(x, y)`.
///
/// The grid is immutable once built; renderers only ever borrow it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleMatrix {
    len: usize,
    // Column-major: modules[x * len + y].
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a `len × len` matrix by asking `dark(x, y)` for every module.
    pub fn from_fn<F>(len: usize, mut dark: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut modules = Vec::with_capacity(len * len);
        for x in 0..len {
            for y in 0..len {
                modules.push(dark(x, y));
            }
        }
        ModuleMatrix { len, modules }
    }

    /// Builds a matrix from rows (`rows[y][x]`). Every row must be as long as
    /// there are rows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qirust_pieces::matrix::ModuleMatrix;
    ///
    /// let m = ModuleMatrix::from_rows(&[
    ///     vec![true, false],
    ///     vec![false, true],
    /// ]).unwrap();
    /// assert!(m.get(1, 1));
    /// assert!(!m.get(1, 0));
    /// ```
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let len = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != len) {
            return Err(Error::InvalidConfiguration(format!(
                "module matrix must be square: row {} has {} modules, expected {}",
                bad,
                rows[bad].len(),
                len
            )));
        }
        Ok(Self::from_fn(len, |x, y| rows[y][x]))
    }

    /// Side length in modules.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether the module at `(x, y)` is dark. Coordinates outside
    /// the symbol are light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.len && y < self.len && self.modules[x * self.len + y]
    }

    /// Returns whether the module at `(x, y)` is dark, treating anything
    /// outside the symbol as light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let len = self.len as i64;
        (0..len).contains(&x) && (0..len).contains(&y) && self.modules[(x * len + y) as usize]
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Turns content into a module matrix.
pub trait MatrixProvider {
    fn generate(&self, content: &str, ecl: ErrorCorrection) -> Result<ModuleMatrix>;
}

/// Matrix provider backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct QrCodeProvider;

impl MatrixProvider for QrCodeProvider {
    fn generate(&self, content: &str, ecl: ErrorCorrection) -> Result<ModuleMatrix> {
        let code = qrcode::QrCode::with_error_correction_level(content.as_bytes(), ecl.into())
            .map_err(|e| Error::MatrixProvider(format!("cannot encode {} bytes at level {:?}: {}", content.len(), ecl, e)))?;
        debug!("encoded {} bytes as {:?} ({} modules wide)", content.len(), code.version(), code.width());
        Ok(ModuleMatrix::from_fn(code.width(), |x, y| code[(x, y)] == qrcode::Color::Dark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(matches!(ModuleMatrix::from_rows(&rows), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_is_dark_outside_is_light() {
        let m = ModuleMatrix::from_fn(3, |_, _| true);
        assert!(m.is_dark(0, 0));
        assert!(m.is_dark(2, 2));
        assert!(!m.is_dark(-1, 0));
        assert!(!m.is_dark(0, 3));
        assert!(!m.is_dark(3, 3));
    }

    #[test]
    fn test_get_outside_is_light() {
        let m = ModuleMatrix::from_fn(3, |_, _| true);
        assert!(m.get(2, 2));
        assert!(!m.get(3, 0));
        assert!(!m.get(0, 3));
        assert!(!m.get(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_indexing_is_x_then_y() {
        let m = ModuleMatrix::from_fn(4, |x, y| x == 3 && y == 0);
        assert!(m.get(3, 0));
        assert!(!m.get(0, 3));
        assert_eq!(m.dark_count(), 1);
    }

    #[test]
    fn test_provider_version_sizing() {
        let m = QrCodeProvider.generate("Hello, world!", ErrorCorrection::L).unwrap();
        assert_eq!(m.len(), 21);

        // 27 bytes do not fit version 3 at level H (24 bytes), so version 4 is used.
        let m = QrCodeProvider.generate("https://i-love-qr-codes.com", ErrorCorrection::H).unwrap();
        assert_eq!(m.len(), 33);
    }

    #[test]
    fn test_provider_finder_pattern_corner() {
        let m = QrCodeProvider.generate("HELLO WORLD", ErrorCorrection::M).unwrap();
        // The top-left finder is a 7x7 dark ring around a light ring and a 3x3 core.
        assert!(m.get(0, 0) && m.get(6, 0) && m.get(0, 6) && m.get(6, 6));
        assert!(!m.get(1, 1) && !m.get(5, 5));
        assert!(m.get(3, 3));
    }

    #[test]
    fn test_provider_reports_capacity_overflow() {
        let content = "x".repeat(2000);
        let err = QrCodeProvider.generate(&content, ErrorCorrection::H).unwrap_err();
        assert!(matches!(err, Error::MatrixProvider(_)));
    }
}
