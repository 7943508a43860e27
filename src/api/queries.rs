//! GraphQL documents sent to monday.com.

/// Board structure without items.
pub const BOARD_SCHEMA_QUERY: &str = r#"
query DiscoverSchema($boardId: ID!) {
    boards(ids: [$boardId]) {
        id
        name
        hierarchy_type
        items_count
        columns {
            id
            title
            type
            settings_str
        }
        groups {
            id
            title
            color
        }
    }
}
"#;

/// One page of items, each with its subitems embedded.
pub const BOARD_ITEMS_QUERY: &str = r#"
query GetBoardItems($boardId: ID!, $cursor: String, $limit: Int!) {
    boards(ids: [$boardId]) {
        items_page(limit: $limit, cursor: $cursor) {
            cursor
            items {
                id
                name
                group {
                    id
                    title
                }
                created_at
                updated_at
                creator {
                    id
                    name
                }
                state
                column_values {
                    id
                    text
                    value
                    type
                }
                subitems {
                    id
                    name
                    created_at
                    updated_at
                    column_values {
                        id
                        text
                        value
                        type
                    }
                }
            }
        }
    }
}
"#;

/// Boards visible to the token, for name search.
pub const BOARD_SEARCH_QUERY: &str = r#"
query SearchBoards($limit: Int!) {
    boards(limit: $limit) {
        id
        name
        state
        workspace_id
        columns {
            id
            title
            type
            settings_str
        }
        groups {
            id
            title
            color
        }
    }
}
"#;

/// The account the token belongs to.
pub const ME_QUERY: &str = r#"
query Me {
    me {
        id
        name
        email
    }
}
"#;

pub const CREATE_ITEM_MUTATION: &str = r#"
mutation CreateItem($boardId: ID!, $itemName: String!, $groupId: String, $columnValues: JSON) {
    create_item(
        board_id: $boardId
        item_name: $itemName
        group_id: $groupId
        column_values: $columnValues
    ) {
        id
        name
    }
}
"#;

pub const UPDATE_COLUMN_VALUES_MUTATION: &str = r#"
mutation UpdateItem($boardId: ID!, $itemId: ID!, $columnValues: JSON!) {
    change_multiple_column_values(
        board_id: $boardId
        item_id: $itemId
        column_values: $columnValues
    ) {
        id
        name
    }
}
"#;

pub const CREATE_UPDATE_MUTATION: &str = r#"
mutation CreateUpdate($itemId: ID!, $body: String!) {
    create_update(item_id: $itemId, body: $body) {
        id
    }
}
"#;
