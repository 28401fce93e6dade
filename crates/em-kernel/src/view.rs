use crate::dtype::Element;
use crate::error::{KernelError, Result};
use crate::shape::SquareShape;

/// Check a claimed byte length against `n` before any buffer is touched.
///
/// Returns the validated shape and the element count N².
fn validate_claim<T: Element>(claimed_bytes: usize, n: usize) -> Result<(SquareShape, usize)> {
    let shape = SquareShape::new(n)?;
    let expected = shape.byte_len::<T>()?;
    if claimed_bytes != expected {
        return Err(KernelError::LengthMismatch {
            claimed: claimed_bytes,
            expected,
        });
    }
    Ok((shape, expected / T::DTYPE.size_in_bytes()))
}

fn check_pointer<T>(ptr: *const T, name: &'static str) -> Result<()> {
    if ptr.is_null() {
        return Err(KernelError::NullPointer(name));
    }
    if (ptr as usize) % std::mem::align_of::<T>() != 0 {
        return Err(KernelError::Misaligned(name));
    }
    Ok(())
}

/// Rejects an output region that overlaps either input region.
///
/// Must run on raw handles before any view is built: an aliased `&mut`
/// cannot be constructed soundly, so the check cannot live on the views.
pub fn ensure_disjoint<T>(a: *const T, b: *const T, c: *mut T, byte_len: usize) -> Result<()> {
    let c_start = c as usize;
    let c_end = c_start.saturating_add(byte_len);
    for input in [a as usize, b as usize] {
        let end = input.saturating_add(byte_len);
        if input < c_end && c_start < end {
            return Err(KernelError::Aliased);
        }
    }
    Ok(())
}

/// A read-only N x N operand whose length has been checked against N.
///
/// Only the constructors can produce a view, so holding one proves the
/// claimed length, the dimension and the backing slice all agree.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T: Element> {
    shape: SquareShape,
    data: &'a [T],
}

impl<'a, T: Element> MatrixView<'a, T> {
    /// Wrap a slice after checking `claimed_bytes == n² * size_of::<T>()`
    /// and that the slice holds exactly that many bytes.
    pub fn from_slice(data: &'a [T], claimed_bytes: usize, n: usize) -> Result<Self> {
        let (shape, numel) = validate_claim::<T>(claimed_bytes, n)?;
        if data.len() != numel {
            return Err(KernelError::LengthMismatch {
                claimed: data.len() * T::DTYPE.size_in_bytes(),
                expected: claimed_bytes,
            });
        }
        Ok(MatrixView { shape, data })
    }

    /// Build a view over caller memory.
    ///
    /// The length claim is checked first; `ptr` is only inspected (never
    /// read) once the claim is consistent with `n`.
    ///
    /// # Safety
    /// If validation succeeds, `ptr` must point to `claimed_bytes` readable
    /// bytes that are not mutated for `'a`.
    pub unsafe fn from_raw_parts(
        ptr: *const T,
        claimed_bytes: usize,
        n: usize,
        name: &'static str,
    ) -> Result<Self> {
        let (shape, numel) = validate_claim::<T>(claimed_bytes, n)?;
        check_pointer(ptr, name)?;
        let data = std::slice::from_raw_parts(ptr, numel);
        Ok(MatrixView { shape, data })
    }

    /// Borrow a buffer owned by a `Matrix`, whose length was checked when
    /// the matrix was built.
    pub(crate) fn from_owned(shape: SquareShape, data: &'a [T]) -> Self {
        MatrixView { shape, data }
    }

    pub fn shape(&self) -> SquareShape {
        self.shape
    }

    pub fn n(&self) -> usize {
        self.shape.n()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Element `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.shape.offset(i, j)]
    }
}

/// The writable counterpart of [`MatrixView`], used for the result buffer.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T: Element> {
    shape: SquareShape,
    data: &'a mut [T],
}

impl<'a, T: Element> MatrixViewMut<'a, T> {
    pub fn from_slice(data: &'a mut [T], claimed_bytes: usize, n: usize) -> Result<Self> {
        let (shape, numel) = validate_claim::<T>(claimed_bytes, n)?;
        if data.len() != numel {
            return Err(KernelError::LengthMismatch {
                claimed: data.len() * T::DTYPE.size_in_bytes(),
                expected: claimed_bytes,
            });
        }
        Ok(MatrixViewMut { shape, data })
    }

    /// # Safety
    /// If validation succeeds, `ptr` must point to `claimed_bytes` writable
    /// bytes with no other live reference for `'a`.
    pub unsafe fn from_raw_parts(
        ptr: *mut T,
        claimed_bytes: usize,
        n: usize,
        name: &'static str,
    ) -> Result<Self> {
        let (shape, numel) = validate_claim::<T>(claimed_bytes, n)?;
        check_pointer(ptr as *const T, name)?;
        let data = std::slice::from_raw_parts_mut(ptr, numel);
        Ok(MatrixViewMut { shape, data })
    }

    pub(crate) fn from_owned(shape: SquareShape, data: &'a mut [T]) -> Self {
        MatrixViewMut { shape, data }
    }

    pub fn shape(&self) -> SquareShape {
        self.shape
    }

    pub fn n(&self) -> usize {
        self.shape.n()
    }

    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }
}
