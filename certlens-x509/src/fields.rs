use crate::error::ShapeError;
use certlens_asn1::{AsnNode, Tag};
use std::{iter::Peekable, slice::Iter};

/// Positional walk over the children of a constructed node.
pub(crate) struct Fields<'n, 'a> {
    children: Peekable<Iter<'n, AsnNode<'a>>>,
}

impl<'n, 'a> Fields<'n, 'a> {
    /// Checks that `node` carries `tag` and walks its children.
    pub(crate) fn of(node: &'n AsnNode<'a>, tag: Tag) -> Result<Self, ShapeError> {
        expect(node, tag)?;
        Ok(Self {
            children: node.children().iter().peekable(),
        })
    }

    /// Next mandatory field.
    pub(crate) fn next(&mut self, expected: Tag) -> Result<&'n AsnNode<'a>, ShapeError> {
        match self.children.next() {
            Some(node) => expect(node, expected),
            None => Err(ShapeError::Missing { expected }),
        }
    }

    /// Next field if it carries `tag`, for OPTIONAL and DEFAULT components.
    pub(crate) fn next_if(&mut self, tag: Tag) -> Option<&'n AsnNode<'a>> {
        self.children.next_if(|node| node.tag() == tag)
    }

    /// Next field whatever its tag, for ANY components.
    pub(crate) fn next_any(&mut self) -> Option<&'n AsnNode<'a>> {
        self.children.next()
    }

    /// Fails if any field is left.
    pub(crate) fn finish(mut self) -> Result<(), ShapeError> {
        match self.children.next() {
            Some(node) => Err(ShapeError::Trailing {
                found: node.tag(),
                offset: node.offset(),
            }),
            None => Ok(()),
        }
    }
}

pub(crate) fn expect<'n, 'a>(node: &'n AsnNode<'a>, expected: Tag) -> Result<&'n AsnNode<'a>, ShapeError> {
    if node.tag() == expected {
        Ok(node)
    } else {
        Err(ShapeError::WrongTag {
            expected,
            found: node.tag(),
            offset: node.offset(),
        })
    }
}
