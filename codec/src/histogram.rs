use crate::raster::Raster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourCount {
    pub grey: u8,
    pub count: u32,
}

/// Occurrence count of every grey level in a raster.
#[derive(Debug, Clone)]
pub struct ColourHistogram {
    entries: Vec<ColourCount>,
}

impl ColourHistogram {
    pub fn from_raster(raster: &Raster) -> Self {
        let mut entries: Vec<ColourCount> = (0..=u8::MAX)
            .map(|grey| ColourCount { grey, count: 0 })
            .collect();

        for pixel in raster.pixels() {
            entries[usize::from(*pixel)].count += 1;
        }

        Self { entries }
    }

    pub fn count(&self, grey: u8) -> u32 {
        self.entries[usize::from(grey)].count
    }

    /// Number of grey levels that occur at least once.
    pub fn distinct(&self) -> usize {
        self.entries.iter().filter(|entry| entry.count > 0).count()
    }

    /// All 256 entries, most frequent first. Equal counts keep ascending grey order.
    pub fn by_frequency(&self) -> Vec<ColourCount> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }
}
