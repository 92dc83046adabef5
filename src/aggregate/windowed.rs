//! Flat array made of equally sized records.

/// `num_windows` records of `window_size` elements each, stored back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedArray<T> {
    data: Vec<T>,
    window_size: usize,
}

impl<T: Clone> WindowedArray<T> {
    pub fn new(num_windows: usize, window_size: usize, fill: T) -> Self {
        Self {
            data: vec![fill; num_windows * window_size],
            window_size,
        }
    }
}

impl<T> WindowedArray<T> {
    pub fn num_windows(&self) -> usize {
        if self.window_size == 0 {
            0
        } else {
            self.data.len() / self.window_size
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Record `index`. Panics when out of range, like slice indexing.
    pub fn window(&self, index: usize) -> &[T] {
        let start = index * self.window_size;
        &self.data[start..start + self.window_size]
    }

    pub fn window_mut(&mut self, index: usize) -> &mut [T] {
        let start = index * self.window_size;
        &mut self.data[start..start + self.window_size]
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_do_not_overlap() {
        let mut a = WindowedArray::new(3, 4, 0_i32);
        a.window_mut(1)[0] = 7;
        a.window_mut(2)[3] = 9;

        assert_eq!(a.num_windows(), 3);
        assert_eq!(a.window(0), &[0, 0, 0, 0]);
        assert_eq!(a.window(1), &[7, 0, 0, 0]);
        assert_eq!(a.data()[11], 9);
    }

    #[test]
    fn test_zero_sized() {
        let a = WindowedArray::new(0, 155, 0_i32);
        assert_eq!(a.num_windows(), 0);
        assert!(a.data().is_empty());

        let b = WindowedArray::new(4, 0, 0.0_f64);
        assert_eq!(b.num_windows(), 0);
    }
}
