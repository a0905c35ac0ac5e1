// Merkle tree over an ordered sequence of byte blobs

use crate::core::{hash256, Hash256};
use crate::error::{Error, Result};

/// Handle of a node inside a [`MerkleTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleNode {
    pub hash: Hash256,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl MerkleNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct MerkleTree {
    nodes: Vec<MerkleNode>,
    leaf_count: usize,
    root: NodeId,
}

fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left.as_bytes());
    combined[32..].copy_from_slice(right.as_bytes());
    hash256(&combined)
}

impl MerkleTree {
    /// Build the tree bottom-up. Each leaf is `hash256(leaf)`; each parent is
    /// `hash256(left || right)`.
    ///
    /// Fails with [`Error::EmptyInput`] when `leaves` is empty.
    pub fn build<I, T>(leaves: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut nodes: Vec<MerkleNode> = leaves
            .into_iter()
            .map(|leaf| MerkleNode {
                hash: hash256(leaf.as_ref()),
                left: None,
                right: None,
            })
            .collect();

        let leaf_count = nodes.len();
        if leaf_count == 0 {
            return Err(Error::EmptyInput);
        }

        let mut level: Vec<NodeId> = (0..leaf_count).map(NodeId).collect();

        while level.len() > 1 {
            if level.len() % 2 == 1 {
                let last = level[level.len() - 1];
                level.push(last);
            }

            let mut next_level = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks_exact(2) {
                let (left, right) = (pair[0], pair[1]);
                let hash = hash_pair(&nodes[left.0].hash, &nodes[right.0].hash);
                nodes.push(MerkleNode {
                    hash,
                    left: Some(left),
                    right: Some(right),
                });
                next_level.push(NodeId(nodes.len() - 1));
            }

            level = next_level;
        }

        log::debug!("Built merkle tree: {} leaves, {} nodes", leaf_count, nodes.len());

        Ok(Self {
            nodes,
            leaf_count,
            root: level[0],
        })
    }

    /// Root hash of the tree built over `leaves`
    pub fn root_of<I, T>(leaves: I) -> Result<Hash256>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Ok(Self::build(leaves)?.root_hash())
    }

    pub fn root(&self) -> &MerkleNode {
        &self.nodes[self.root.0]
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root_hash(&self) -> Hash256 {
        self.root().hash
    }

    pub fn node(&self, id: NodeId) -> Option<&MerkleNode> {
        self.nodes.get(id.0)
    }

    /// Leaf nodes in input order
    pub fn leaves(&self) -> &[MerkleNode] {
        &self.nodes[..self.leaf_count]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of distinct nodes stored; duplicated nodes count once
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least one leaf
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check every node reachable from the root
    pub fn verify(&self) -> bool {
        self.verify_node(self.root)
    }

    /// True iff every internal node under `id` hashes its two children and
    /// every leaf has no children. Unknown handles fail.
    pub fn verify_node(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };

        match (node.left, node.right) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                let (Some(l), Some(r)) = (self.node(left), self.node(right)) else {
                    return false;
                };
                hash_pair(&l.hash, &r.hash) == node.hash
                    && self.verify_node(left)
                    && self.verify_node(right)
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn node_mut(&mut self, id: NodeId) -> &mut MerkleNode {
        &mut self.nodes[id.0]
    }
}
