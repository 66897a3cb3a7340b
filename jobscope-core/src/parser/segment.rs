//! Job block segmentation

/// Log line the worker emits when it starts logging for a new job
pub const JOB_DELIMITER: &str = "Setting log level to INFO";

/// Split raw worker log text into per-job blocks
///
/// The returned iterator is lazy and `Clone`, so callers can walk the blocks
/// more than once. Blocks that are blank after trimming are skipped.
pub fn segment_blocks(text: &str) -> impl Iterator<Item = &str> + Clone + '_ {
    text.split(JOB_DELIMITER)
        .filter(|block| !block.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_blocks() {
        assert_eq!(segment_blocks("").count(), 0);
        assert_eq!(segment_blocks("   \n\t").count(), 0);
    }

    #[test]
    fn test_splits_on_delimiter_and_drops_blank_blocks() {
        let text = format!(
            "{d}\njob one\n{d}\n   \n{d}\njob two\n",
            d = JOB_DELIMITER
        );
        let blocks: Vec<&str> = segment_blocks(&text).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("job one"));
        assert!(blocks[1].contains("job two"));
    }

    #[test]
    fn test_segments_are_restartable() {
        let text = format!("a{d}b{d}c", d = JOB_DELIMITER);
        let blocks = segment_blocks(&text);
        let first: Vec<&str> = blocks.clone().collect();
        let second: Vec<&str> = blocks.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["a", "b", "c"]);
    }
}
