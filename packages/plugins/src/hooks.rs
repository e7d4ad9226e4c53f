/// Standard client methods the pipeline generates for a table
///
/// Each kind fires `client_method_generated` and, when it has a statement,
/// `sql_map_element_generated`. `method_name` is the Java method name and
/// doubles as the statement id in the mapper XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientMethodKind {
    CountByExample,
    DeleteByExample,
    DeleteByPrimaryKey,
    Insert,
    InsertSelective,
    SelectAll,
    SelectByExampleWithBlobs,
    SelectByExampleWithoutBlobs,
    SelectByPrimaryKey,
    UpdateByExampleSelective,
    UpdateByExampleWithBlobs,
    UpdateByExampleWithoutBlobs,
    UpdateByPrimaryKeySelective,
    UpdateByPrimaryKeyWithBlobs,
    UpdateByPrimaryKeyWithoutBlobs,
}

impl ClientMethodKind {
    /// Generation order used by the pipeline
    pub const ALL: [ClientMethodKind; 15] = [
        ClientMethodKind::CountByExample,
        ClientMethodKind::DeleteByExample,
        ClientMethodKind::DeleteByPrimaryKey,
        ClientMethodKind::Insert,
        ClientMethodKind::InsertSelective,
        ClientMethodKind::SelectByExampleWithBlobs,
        ClientMethodKind::SelectByExampleWithoutBlobs,
        ClientMethodKind::SelectByPrimaryKey,
        ClientMethodKind::UpdateByExampleSelective,
        ClientMethodKind::UpdateByExampleWithBlobs,
        ClientMethodKind::UpdateByExampleWithoutBlobs,
        ClientMethodKind::UpdateByPrimaryKeySelective,
        ClientMethodKind::UpdateByPrimaryKeyWithBlobs,
        ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs,
        ClientMethodKind::SelectAll,
    ];

    pub fn method_name(&self) -> &'static str {
        match self {
            ClientMethodKind::CountByExample => "countByExample",
            ClientMethodKind::DeleteByExample => "deleteByExample",
            ClientMethodKind::DeleteByPrimaryKey => "deleteByPrimaryKey",
            ClientMethodKind::Insert => "insert",
            ClientMethodKind::InsertSelective => "insertSelective",
            ClientMethodKind::SelectAll => "selectAll",
            ClientMethodKind::SelectByExampleWithBlobs => "selectByExampleWithBLOBs",
            ClientMethodKind::SelectByExampleWithoutBlobs => "selectByExample",
            ClientMethodKind::SelectByPrimaryKey => "selectByPrimaryKey",
            ClientMethodKind::UpdateByExampleSelective => "updateByExampleSelective",
            ClientMethodKind::UpdateByExampleWithBlobs => "updateByExampleWithBLOBs",
            ClientMethodKind::UpdateByExampleWithoutBlobs => "updateByExample",
            ClientMethodKind::UpdateByPrimaryKeySelective => "updateByPrimaryKeySelective",
            ClientMethodKind::UpdateByPrimaryKeyWithBlobs => "updateByPrimaryKeyWithBLOBs",
            ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs => "updateByPrimaryKey",
        }
    }

    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.method_name() == name)
    }

    /// Methods that take or filter by the example type
    pub fn requires_example(&self) -> bool {
        matches!(
            self,
            ClientMethodKind::CountByExample
                | ClientMethodKind::DeleteByExample
                | ClientMethodKind::SelectByExampleWithBlobs
                | ClientMethodKind::SelectByExampleWithoutBlobs
                | ClientMethodKind::UpdateByExampleSelective
                | ClientMethodKind::UpdateByExampleWithBlobs
                | ClientMethodKind::UpdateByExampleWithoutBlobs
        )
    }

    pub fn requires_primary_key(&self) -> bool {
        matches!(
            self,
            ClientMethodKind::DeleteByPrimaryKey
                | ClientMethodKind::SelectByPrimaryKey
                | ClientMethodKind::UpdateByPrimaryKeySelective
                | ClientMethodKind::UpdateByPrimaryKeyWithBlobs
                | ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs
        )
    }

    /// Variants that only exist for tables with BLOB columns
    pub fn requires_blobs(&self) -> bool {
        matches!(
            self,
            ClientMethodKind::SelectByExampleWithBlobs
                | ClientMethodKind::UpdateByExampleWithBlobs
                | ClientMethodKind::UpdateByPrimaryKeyWithBlobs
        )
    }
}

/// Which client overload a callback belongs to
///
/// The pipeline fires every client hook once per configured style; plugins
/// must treat the class-style call as a duplicate of the interface one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientStyle {
    Interface,
    Class,
}
