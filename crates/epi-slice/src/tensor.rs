use epi_core::{Context, EpiError, ErrorInfo};

/// Interprets flat vectors of length `base^rank` as rank-`rank` tensors.
///
/// Axis 0 is the most significant digit of the flat index, so a 5-species
/// index `b0 b1 b2 b3 b4` lands at tensor position `[b0][b1][b2][b3][b4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorProjector {
    base: usize,
    rank: usize,
}

impl TensorProjector {
    /// Creates a projector for `rank` axes of extent `base`.
    pub fn new(base: usize, rank: usize) -> Result<Self, EpiError> {
        if base == 0 || flat_len(base, rank).is_none() {
            return Err(EpiError::Domain(
                ErrorInfo::new("tensor-geometry", "tensor geometry is empty or overflows")
                    .with_context("base", base.to_string())
                    .with_context("rank", rank.to_string()),
            ));
        }
        Ok(Self { base, rank })
    }

    /// Extent of every axis.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of elements in a tensor of this geometry.
    pub fn len(&self) -> usize {
        flat_len(self.base, self.rank).unwrap_or(0)
    }

    /// Returns true for the degenerate zero-element geometry (never constructed).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows `values` as a tensor without copying.
    pub fn reshape<'a, T: Copy>(&self, values: &'a [T]) -> Result<Tensor<'a, T>, EpiError> {
        if values.len() != self.len() {
            return Err(EpiError::length_mismatch(
                "tensor-length",
                "flat vector",
                self.len(),
                values.len(),
            ));
        }
        Ok(Tensor {
            data: values,
            geometry: *self,
        })
    }

    /// Shorthand for `reshape(values)?.project(context)`.
    pub fn project_vector<T: Copy>(
        &self,
        values: &[T],
        context: &Context,
    ) -> Result<Vec<T>, EpiError> {
        self.reshape(values)?.project(context)
    }
}

/// Borrowed tensor view over a flat slice.
#[derive(Debug, Clone, Copy)]
pub struct Tensor<'a, T> {
    data: &'a [T],
    geometry: TensorProjector,
}

impl<T: Copy> Tensor<'_, T> {
    /// Geometry of the view.
    pub fn geometry(&self) -> TensorProjector {
        self.geometry
    }

    /// Reads the element at a full multi-index.
    pub fn get(&self, index: &[usize]) -> Result<T, EpiError> {
        if index.len() != self.geometry.rank {
            return Err(EpiError::length_mismatch(
                "tensor-index",
                "multi-index",
                self.geometry.rank,
                index.len(),
            ));
        }
        let mut flat = 0;
        for (axis, &digit) in index.iter().enumerate() {
            self.check_digit(axis, digit)?;
            flat = flat * self.geometry.base + digit;
        }
        Ok(self.data[flat])
    }

    /// Fixes the axes in `context` and flattens the remaining free axes.
    ///
    /// Free axes keep increasing axis order with the last one varying
    /// fastest, which reproduces the flat order of a landscape over the free
    /// species alone.
    pub fn project(&self, context: &Context) -> Result<Vec<T>, EpiError> {
        let TensorProjector { base, rank } = self.geometry;
        let mut offset = 0;
        for (axis, value) in context.iter() {
            if axis >= rank {
                return Err(EpiError::Domain(
                    ErrorInfo::new("projection-axis", "fixed axis lies outside the tensor")
                        .with_context("axis", axis.to_string())
                        .with_context("rank", rank.to_string()),
                ));
            }
            self.check_digit(axis, value)?;
            offset += value * self.stride(axis);
        }

        let strides: Vec<usize> = context
            .free_axes(rank)
            .into_iter()
            .map(|axis| self.stride(axis))
            .collect();
        let count = flat_len(base, strides.len()).unwrap_or(0);
        let mut digits = vec![0usize; strides.len()];
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let flat = offset
                + digits
                    .iter()
                    .zip(&strides)
                    .map(|(digit, stride)| digit * stride)
                    .sum::<usize>();
            out.push(self.data[flat]);
            // Odometer step, last free axis fastest.
            for digit in digits.iter_mut().rev() {
                *digit += 1;
                if *digit < base {
                    break;
                }
                *digit = 0;
            }
        }
        Ok(out)
    }

    fn stride(&self, axis: usize) -> usize {
        self.geometry.base.pow((self.geometry.rank - 1 - axis) as u32)
    }

    fn check_digit(&self, axis: usize, digit: usize) -> Result<(), EpiError> {
        if digit >= self.geometry.base {
            return Err(EpiError::Domain(
                ErrorInfo::new("projection-value", "fixed value exceeds the axis extent")
                    .with_context("axis", axis.to_string())
                    .with_context("value", digit.to_string())
                    .with_context("base", self.geometry.base.to_string()),
            ));
        }
        Ok(())
    }
}

fn flat_len(base: usize, rank: usize) -> Option<usize> {
    u32::try_from(rank).ok().and_then(|rank| base.checked_pow(rank))
}
