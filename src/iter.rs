//! Key and value projections shared by every table's pair iterator.

/// An iterator over the keys of a table.
#[derive(Debug, Clone)]
pub struct Keys<I> {
    pub(crate) inner: I,
}

impl<'a, K: 'a, V: 'a, I> Iterator for Keys<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator over the values of a table.
#[derive(Debug, Clone)]
pub struct Values<I> {
    pub(crate) inner: I,
}

impl<'a, K: 'a, V: 'a, I> Iterator for Values<I>
where
    I: Iterator<Item = (&'a K, &'a V)>,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
