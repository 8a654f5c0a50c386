// Data models shared by the collectors and the table renderer

/// The four fixed dashboard categories, in refresh and tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Processor model, cores, frequency, usage and temperatures
    Cpu,
    /// Physical memory and swap
    Ram,
    /// NVIDIA GPU or connected displays
    Gpu,
    /// OS identity, kernel and boot time
    System,
}

impl Category {
    /// Every category in the order collectors run and tabs are drawn.
    pub const ALL: [Category; 4] = [Category::Cpu, Category::Ram, Category::Gpu, Category::System];

    /// Tab caption for this category.
    pub fn title(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Ram => "RAM",
            Category::Gpu => "GPU",
            Category::System => "System",
        }
    }

    /// Position of this category inside `Category::ALL`.
    pub fn index(self) -> usize {
        match self {
            Category::Cpu => 0,
            Category::Ram => 1,
            Category::Gpu => 2,
            Category::System => 3,
        }
    }
}

/// A single line of the information table.
/// Either a section header or a label/value pair.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    /// Text shown in the "Information" column
    pub label: String,
    /// Text shown in the "Value" column (empty for headers)
    pub value: String,
    /// Section headers get the accent colour and bold font
    pub is_header: bool,
}

impl MetricRow {
    /// Creates a section header row with an empty value cell.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            is_header: true,
        }
    }

    /// Creates a regular label/value row.
    pub fn entry(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_header: false,
        }
    }
}

/// Every row of one category at one point in time.
/// Built fresh on each refresh and replaced wholesale by the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySnapshot {
    /// Which tab this snapshot belongs to
    pub category: Category,
    /// Rows in display order
    pub rows: Vec<MetricRow>,
}

impl CategorySnapshot {
    /// Creates an empty snapshot for the given category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            rows: Vec::new(),
        }
    }

    /// Appends a section header.
    pub fn push_header(&mut self, label: impl Into<String>) {
        self.rows.push(MetricRow::header(label));
    }

    /// Appends a label/value row.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(MetricRow::entry(label, value));
    }

    /// Single-row snapshot shown when a category has no data source at all.
    pub fn unavailable(category: Category, label: impl Into<String>) -> Self {
        let mut s = Self::new(category);
        s.push(label, "Not available");
        s
    }

    /// Number of rows, headers included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no row, not even a header, has been pushed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_index_matches_all_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn snapshot_keeps_insertion_order_and_duplicates() {
        let mut s = CategorySnapshot::new(Category::Gpu);
        s.push_header("Display Information");
        s.push("Display", "HDMI-1");
        s.push("Display", "DP-1");

        assert_eq!(s.len(), 3);
        assert!(s.rows[0].is_header);
        assert!(s.rows[0].value.is_empty());
        assert_eq!(s.rows[1].value, "HDMI-1");
        assert_eq!(s.rows[2].value, "DP-1");
    }

    #[test]
    fn fresh_snapshot_is_empty() {
        let mut s = CategorySnapshot::new(Category::Ram);
        assert!(s.is_empty());
        s.push_header("Memory Information");
        assert!(!s.is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn unavailable_is_a_single_content_row() {
        let s = CategorySnapshot::unavailable(Category::Gpu, "GPU Information");
        assert_eq!(s.rows, vec![MetricRow::entry("GPU Information", "Not available")]);
    }
}
