use crate::view::{Block, BlockView};

/// Concatenates the non-empty accessibility values of `blocks` in order.
///
/// Values are joined with no separator. `None` when no block contributed.
pub fn aggregate<'a, M, T, I>(blocks: I) -> Option<String>
where
    M: BlockView + 'a,
    T: BlockView + 'a,
    I: IntoIterator<Item = &'a Block<M, T>>,
{
    let mut composite: Option<String> = None;
    for value in blocks
        .into_iter()
        .filter_map(Block::accessibility_value)
        .filter(|value| !value.is_empty())
    {
        match composite.as_mut() {
            Some(composite) => composite.push_str(value),
            None => composite = Some(value.to_string()),
        }
    }
    composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Value(Option<&'static str>);

    impl BlockView for Value {
        fn accessibility_value(&self) -> Option<&str> {
            self.0
        }
    }

    fn blocks(values: &[Option<&'static str>]) -> Vec<Block<Value, Value>> {
        values.iter().map(|v| Block::Text(Value(*v))).collect()
    }

    #[rstest]
    #[case::skips_empty(&[Some("a"), Some(""), Some("bc")], Some("abc"))]
    #[case::all_absent(&[None, None], None)]
    #[case::all_empty(&[Some(""), Some("")], None)]
    #[case::no_blocks(&[], None)]
    #[case::absent_between(&[Some("x"), None, Some("y")], Some("xy"))]
    fn aggregates_in_order(
        #[case] values: &[Option<&'static str>],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(aggregate(&blocks(values)).as_deref(), expected);
    }

    #[test]
    fn media_and_text_both_contribute() {
        let blocks: Vec<Block<Value, Value>> = vec![
            Block::Media(Value(Some("video "))),
            Block::Text(Value(Some("caption"))),
        ];
        assert_eq!(aggregate(&blocks).as_deref(), Some("video caption"));
    }
}
