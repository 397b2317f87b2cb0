use crate::attribute_lists::InMemoryAttributeLists;
use crate::core::{AttributeSpec, DatasetHeader, NodeContext, Rid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Context plus the value-sorted `(rid, value)` list of a single attribute.
/// `rows[i]` is record `i`.
pub fn labelled_column(rows: &[(f64, &str)]) -> (NodeContext, Vec<(Rid, f64)>) {
    let context = NodeContext::from_labels(rows.iter().map(|(_, label)| *label))
        .expect("fixture rids are unique");
    let mut list: Vec<(Rid, f64)> = rows
        .iter()
        .enumerate()
        .map(|(rid, (value, _))| (rid, *value))
        .collect();
    list.sort_by(|a, b| a.1.total_cmp(&b.1));
    (context, list)
}

pub struct RandomDataset {
    pub header: DatasetHeader,
    pub context: NodeContext,
    pub lists: InMemoryAttributeLists,
    pub columns: Vec<Vec<f64>>,
}

/// Seeded dataset with `numeric` integer-valued attributes (lots of ties), one
/// categorical attribute and a class column with `classes` labels.
pub fn random_dataset(seed: u64, records: usize, numeric: usize, classes: usize) -> RandomDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let labels: Vec<String> = (0..records)
        .map(|_| format!("c{}", rng.random_range(0..classes.max(1))))
        .collect();
    let context = NodeContext::from_labels(&labels).expect("fixture rids are unique");

    let columns: Vec<Vec<f64>> = (0..numeric)
        .map(|_| {
            (0..records)
                .map(|_| rng.random_range(0..20) as f64)
                .collect()
        })
        .collect();

    let mut attributes: Vec<AttributeSpec> = (0..numeric)
        .map(|i| AttributeSpec::numeric(format!("a{i}")))
        .collect();
    attributes.push(AttributeSpec::categorical("color"));
    attributes.push(AttributeSpec::categorical("class"));
    let class_index = attributes.len() - 1;
    let header = DatasetHeader::new(attributes, class_index).expect("fixture header is valid");

    let mut lists = InMemoryAttributeLists::new();
    for (i, column) in columns.iter().enumerate() {
        lists.insert_column(format!("a{i}"), column);
    }

    RandomDataset {
        header,
        context,
        lists,
        columns,
    }
}

/// The `car`-like dataset in the delimited text format read by ingestion.
pub const SMALL_CSV: &str = "\
buying,maint,doors,class
4,vhigh,2,unacc
3,high,2,unacc
1,low,4,acc
2,med,4,acc
1,low,5,acc
4,vhigh,5,unacc
";
