//! Font-size classification.

use crate::model::{HeadingLevel, LevelMap, MergedLine};

/// Build the document-global level map from the largest distinct sizes.
///
/// Classification runs over every line of the document at once so that a
/// level means the same typographic tier on every page.
pub fn classify_sizes(lines: &[MergedLine]) -> LevelMap {
    let mut sizes: Vec<f32> = lines.iter().map(|l| l.size).collect();
    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes.dedup();
    sizes.truncate(HeadingLevel::ALL.len());

    log::debug!("Level map sizes: {:?}", sizes);
    LevelMap::from_sorted_sizes(&sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(size: f32) -> MergedLine {
        MergedLine {
            page: 1,
            text: "text".to_string(),
            size,
            is_bold: false,
            y_top: 0.0,
        }
    }

    #[test]
    fn test_classify_top_three() {
        let lines: Vec<MergedLine> = [24.0, 24.0, 18.0, 18.0, 12.0, 12.0, 10.0]
            .into_iter()
            .map(line)
            .collect();
        let map = classify_sizes(&lines);
        assert_eq!(map.len(), 3);
        assert_eq!(map.level_for(24.0), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(18.0), Some(HeadingLevel::H2));
        assert_eq!(map.level_for(12.0), Some(HeadingLevel::H3));
        assert_eq!(map.level_for(10.0), None);
    }

    #[test]
    fn test_classify_order_independent() {
        let lines: Vec<MergedLine> = [10.0, 12.0, 24.0, 18.0].into_iter().map(line).collect();
        let map = classify_sizes(&lines);
        assert_eq!(map.level_for(24.0), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(10.0), None);
    }

    #[test]
    fn test_classify_fewer_sizes() {
        let lines: Vec<MergedLine> = [14.0, 11.0, 14.0].into_iter().map(line).collect();
        let map = classify_sizes(&lines);
        assert_eq!(map.len(), 2);
        assert_eq!(map.level_for(14.0), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(11.0), Some(HeadingLevel::H2));
        assert!(map.iter().all(|(_, level)| level != HeadingLevel::H3));
    }

    #[test]
    fn test_classify_empty() {
        assert!(classify_sizes(&[]).is_empty());
    }

    #[test]
    fn test_classify_near_sizes_are_distinct() {
        let lines: Vec<MergedLine> = [12.0, 12.01, 11.99, 9.0].into_iter().map(line).collect();
        let map = classify_sizes(&lines);
        assert_eq!(map.level_for(12.01), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(12.0), Some(HeadingLevel::H2));
        assert_eq!(map.level_for(11.99), Some(HeadingLevel::H3));
        assert_eq!(map.level_for(9.0), None);
    }
}
