use common::{ProbabilityScale, ProbabilityVector};

/// Header cells of the results table
pub const RESULT_HEADER: [&str; 2] = ["Number", "%"];

/// Two-column (label, score) table. The first row is always the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    rows: Vec<[String; 2]>,
}

impl ResultTable {
    pub fn rows(&self) -> &[[String; 2]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `<tr>` markup for the table element's inner HTML
    pub fn to_html(&self) -> String {
        self.rows
            .iter()
            .map(|[label, score]| format!("<tr><td>{}</td><td>{}</td></tr>", label, score))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRenderer {
    scale: ProbabilityScale,
}

impl ResultRenderer {
    pub fn new(scale: ProbabilityScale) -> Self {
        Self { scale }
    }

    pub fn render(&self, vector: &ProbabilityVector) -> ResultTable {
        let header = RESULT_HEADER.map(str::to_string);
        let rows = std::iter::once(header)
            .chain(vector.iter().map(|(digit, score)| {
                [digit.to_string(), self.scale.to_percent(score).to_string()]
            }))
            .collect();
        ResultTable { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> ProbabilityVector {
        ProbabilityVector::new([0.0, 0.5, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0])
    }

    #[test]
    fn test_header_plus_one_row_per_digit() {
        let table = ResultRenderer::default().render(&vector());

        assert_eq!(table.len(), 11);
        assert_eq!(table.rows()[0], ["Number".to_string(), "%".to_string()]);
        for digit in 0..10 {
            assert_eq!(table.rows()[digit + 1][0], digit.to_string());
        }
    }

    #[test]
    fn test_fraction_scores_become_percentages() {
        let table = ResultRenderer::new(ProbabilityScale::Fraction).render(&vector());
        assert_eq!(table.rows()[2][1], "50");
        assert_eq!(table.rows()[3][1], "25");
        assert_eq!(table.rows()[10][1], "100");
    }

    #[test]
    fn test_percent_scores_pass_through() {
        let table = ResultRenderer::new(ProbabilityScale::Percent).render(&vector());
        assert_eq!(table.rows()[2][1], "0.5");
    }

    #[test]
    fn test_html_markup() {
        let table = ResultRenderer::default().render(&vector());
        let html = table.to_html();

        assert!(html.starts_with("<tr><td>Number</td><td>%</td></tr><tr><td>0</td><td>0</td></tr>"));
        assert_eq!(html.matches("<tr>").count(), 11);
    }
}
