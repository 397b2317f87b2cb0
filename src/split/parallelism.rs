/// How the selector schedules per-attribute scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// One scan after another on the calling thread.
    #[default]
    Sequential,
    /// Up to `n` scans at once on a dedicated rayon pool.
    Parallel(usize),
}

impl Parallelism {
    /// `0` uses rayon's default thread count, `1` is sequential.
    pub fn from_threads(threads: usize) -> Self {
        match threads {
            0 => Self::Parallel(rayon::current_num_threads()),
            1 => Self::Sequential,
            n => Self::Parallel(n),
        }
    }

    pub fn threads(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(n) => n.max(1),
        }
    }

    /// Never uses more threads than there are attributes to scan.
    pub fn for_attributes(self, attributes: usize) -> Self {
        match self {
            Self::Sequential => Self::Sequential,
            Self::Parallel(n) => match n.min(attributes) {
                0 | 1 => Self::Sequential,
                n => Self::Parallel(n),
            },
        }
    }
}
