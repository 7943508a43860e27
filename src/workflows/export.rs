use crate::api::GraphQlTransport;
use crate::connector::BoardConnector;
use crate::error::AppError;
use crate::model::{BoardSchema, DataNode, NodeKind};
use crate::types::BoardId;
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::io::Write;

const NAME_COLUMN_TYPE: &str = "name";

/// Streams a board's items to CSV: `id,name,group,<column titles…>`.
///
/// Cells hold each column's display text; `name` columns repeat the item
/// name. Subitems are not exported. Only one page of items is held in memory
/// at a time. Returns the number of rows written, header excluded.
pub fn export_board_csv<T, W>(
    connector: &BoardConnector<T>,
    board_id: &BoardId,
    out: W,
) -> Result<usize, AppError>
where
    T: GraphQlTransport,
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    let mut stream = connector.traverse_hierarchy(board_id, false);
    let mut rows = 0;

    while let Some(node) = stream.next() {
        let node = node?;
        match node.kind {
            NodeKind::Board => {
                if let Some(schema) = stream.schema() {
                    write_header(&mut writer, schema)?;
                }
            }
            NodeKind::Item => {
                if let Some(schema) = stream.schema() {
                    write_row(&mut writer, schema, &node)?;
                    rows += 1;
                }
            }
            NodeKind::Group | NodeKind::Subitem => {}
        }
    }

    writer.flush()?;
    log::info!("Exported {} rows from board {}", rows, board_id);
    Ok(rows)
}

fn write_header<W: Write>(writer: &mut Writer<W>, schema: &BoardSchema) -> Result<(), AppError> {
    let header = ["id", "name", "group"]
        .into_iter()
        .chain(schema.columns.iter().map(|c| c.title.as_str()));
    writer.write_record(header)?;
    Ok(())
}

fn write_row<W: Write>(
    writer: &mut Writer<W>,
    schema: &BoardSchema,
    item: &DataNode,
) -> Result<(), AppError> {
    let fixed = [
        item.id.as_str(),
        item.name.as_str(),
        item.metadata.group_title.as_deref().unwrap_or_default(),
    ];
    // Items never report a value for the board's `name` column.
    let cells = schema.columns.iter().map(|column| {
        if column.type_tag == NAME_COLUMN_TYPE {
            return item.name.as_str();
        }
        item.column_value(&column.id)
            .and_then(|value| value.text.as_deref())
            .unwrap_or_default()
    });
    writer.write_record(fixed.into_iter().chain(cells))?;
    Ok(())
}
