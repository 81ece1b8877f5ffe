//! Built-in MolNet catalog.
//!
//! Descriptors are rebuilt from a [`SourceConfig`] so a mirror can replace the
//! DeepChem S3 bucket without touching the entries themselves.

use crate::config::SourceConfig;
use crate::descriptor::{
    DatasetDescriptor, DatasetType, DatasetUrl, SplitStrategy, SubsetUrl, TaskColumns, TaskType,
};
use crate::metrics::{Loss, Metric, MetricSet};

/// Registry keys of the built-in catalog, in catalog order.
pub const MOLNET_DATASETS: [&str; 24] = [
    "bace_Class",
    "bace_pIC50",
    "bbbp",
    "chembl",
    "clearance",
    "clintox",
    "delaney",
    "HIV",
    "hopv",
    "kaggle",
    "lipo",
    "muv",
    "nci",
    "pcba",
    "pdbbind_smiles",
    "pdbbind_grid",
    "ppb",
    "qm7",
    "qm8",
    "qm9",
    "SAMPL",
    "sider",
    "tox21",
    "toxcast",
];

const PDBBIND_SUBSETS: [&str; 3] = ["core", "full", "refined"];

const HOPV_TASKS: &[&str] = &[
    "HOMO",
    "LUMO",
    "electrochemical_gap",
    "optical_gap",
    "PCE",
    "V_OC",
    "J_SC",
    "fill_factor",
];

const KAGGLE_TASKS: &[&str] = &[
    "3A4", "CB1", "DPP4", "HIVINT", "HIV_PROT", "LOGD", "METAB", "NK1", "OX1", "OX2", "PGP", "PPB",
    "RAT_F", "TDI", "THROMBIN",
];

const MUV_TASKS: &[&str] = &[
    "MUV-692", "MUV-689", "MUV-846", "MUV-859", "MUV-644", "MUV-548", "MUV-852", "MUV-600",
    "MUV-810", "MUV-712", "MUV-737", "MUV-858", "MUV-713", "MUV-733", "MUV-652", "MUV-466",
    "MUV-832",
];

#[rustfmt::skip]
const NCI_TASKS: &[&str] = &[
    "CCRF-CEM", "HL-60(TB)", "K-562", "MOLT-4", "RPMI-8226",
    "SR", "A549/ATCC", "EKVX", "HOP-62", "HOP-92", "NCI-H226",
    "NCI-H23", "NCI-H322M", "NCI-H460", "NCI-H522", "COLO 205",
    "HCC-2998", "HCT-116", "HCT-15", "HT29", "KM12", "SW-620",
    "SF-268", "SF-295", "SF-539", "SNB-19", "SNB-75", "U251",
    "LOX IMVI", "MALME-3M", "M14", "MDA-MB-435", "SK-MEL-2",
    "SK-MEL-28", "SK-MEL-5", "UACC-257", "UACC-62", "IGR-OV1",
    "OVCAR-3", "OVCAR-4", "OVCAR-5", "OVCAR-8", "NCI/ADR-RES",
    "SK-OV-3", "786-0", "A498", "ACHN", "CAKI-1", "RXF 393",
    "SN12C", "TK-10", "UO-31", "PC-3", "DU-145", "MCF7",
    "MDA-MB-231/ATCC", "MDA-MB-468", "HS 578T", "BT-549", "T-47D",
];

#[rustfmt::skip]
const PCBA_TASKS: &[&str] = &[
    "PCBA-1030", "PCBA-1379", "PCBA-1452", "PCBA-1454", "PCBA-1457",
    "PCBA-1458", "PCBA-1460", "PCBA-1461", "PCBA-1468", "PCBA-1469",
    "PCBA-1471", "PCBA-1479", "PCBA-1631", "PCBA-1634", "PCBA-1688",
    "PCBA-1721", "PCBA-2100", "PCBA-2101", "PCBA-2147", "PCBA-2242",
    "PCBA-2326", "PCBA-2451", "PCBA-2517", "PCBA-2528", "PCBA-2546",
    "PCBA-2549", "PCBA-2551", "PCBA-2662", "PCBA-2675", "PCBA-2676",
    "PCBA-411", "PCBA-463254", "PCBA-485281", "PCBA-485290",
    "PCBA-485294", "PCBA-485297", "PCBA-485313", "PCBA-485314",
    "PCBA-485341", "PCBA-485349", "PCBA-485353", "PCBA-485360",
    "PCBA-485364", "PCBA-485367", "PCBA-492947", "PCBA-493208",
    "PCBA-504327", "PCBA-504332", "PCBA-504333", "PCBA-504339",
    "PCBA-504444", "PCBA-504466", "PCBA-504467", "PCBA-504706",
    "PCBA-504842", "PCBA-504845", "PCBA-504847", "PCBA-504891",
    "PCBA-540276", "PCBA-540317", "PCBA-588342", "PCBA-588453",
    "PCBA-588456", "PCBA-588579", "PCBA-588590", "PCBA-588591",
    "PCBA-588795", "PCBA-588855", "PCBA-602179", "PCBA-602233",
    "PCBA-602310", "PCBA-602313", "PCBA-602332", "PCBA-624170",
    "PCBA-624171", "PCBA-624173", "PCBA-624202", "PCBA-624246",
    "PCBA-624287", "PCBA-624288", "PCBA-624291", "PCBA-624296",
    "PCBA-624297", "PCBA-624417", "PCBA-651635", "PCBA-651644",
    "PCBA-651768", "PCBA-651965", "PCBA-652025", "PCBA-652104",
    "PCBA-652105", "PCBA-652106", "PCBA-686970", "PCBA-686978",
    "PCBA-686979", "PCBA-720504", "PCBA-720532", "PCBA-720542",
    "PCBA-720551", "PCBA-720553", "PCBA-720579", "PCBA-720580",
    "PCBA-720707", "PCBA-720708", "PCBA-720709", "PCBA-720711",
    "PCBA-743255", "PCBA-743266", "PCBA-875", "PCBA-881", "PCBA-883",
    "PCBA-884", "PCBA-885", "PCBA-887", "PCBA-891", "PCBA-899",
    "PCBA-902", "PCBA-903", "PCBA-904", "PCBA-912", "PCBA-914",
    "PCBA-915", "PCBA-924", "PCBA-925", "PCBA-926", "PCBA-927",
    "PCBA-938", "PCBA-995",
];

// The PBE0 block repeats: the upstream CSV header carries these four labels twice.
#[rustfmt::skip]
const QM8_TASKS: &[&str] = &[
    "E1-CC2", "E2-CC2", "f1-CC2", "f2-CC2", "E1-PBE0", "E2-PBE0",
    "f1-PBE0", "f2-PBE0", "E1-PBE0", "E2-PBE0", "f1-PBE0",
    "f2-PBE0", "E1-CAM", "E2-CAM", "f1-CAM", "f2-CAM",
];

const QM9_TASKS: &[&str] = &[
    "mu", "alpha", "homo", "lumo", "gap", "r2", "zpve", "cv", "u0", "u298", "h298", "g298",
];

#[rustfmt::skip]
const SIDER_TASKS: &[&str] = &[
    "Hepatobiliary disorders",
    "Metabolism and nutrition disorders", "Product issues",
    "Eye disorders", "Investigations",
    "Musculoskeletal and connective tissue disorders",
    "Gastrointestinal disorders", "Social circumstances",
    "Immune system disorders",
    "Reproductive system and breast disorders",
    "Neoplasms benign, malignant and unspecified (incl cysts and polyps)",
    "General disorders and administration site conditions",
    "Endocrine disorders", "Surgical and medical procedures",
    "Vascular disorders", "Blood and lymphatic system disorders",
    "Skin and subcutaneous tissue disorders",
    "Congenital, familial and genetic disorders",
    "Infections and infestations",
    "Respiratory, thoracic and mediastinal disorders",
    "Psychiatric disorders", "Renal and urinary disorders",
    "Pregnancy, puerperium and perinatal conditions",
    "Ear and labyrinth disorders", "Cardiac disorders",
    "Nervous system disorders",
    "Injury, poisoning and procedural complications",
];

const TOX21_TASKS: &[&str] = &[
    "NR-AR",
    "NR-AR-LBD",
    "NR-AhR",
    "NR-Aromatase",
    "NR-ER",
    "NR-ER-LBD",
    "NR-PPAR-gamma",
    "SR-ARE",
    "SR-ATAD5",
    "SR-HSE",
    "SR-MMP",
    "SR-p53",
];

fn roc_metrics() -> Option<MetricSet> {
    Some(
        MetricSet::new()
            .with("binary_accuracy", Metric::BinaryAccuracy)
            .with("roc_auc", Metric::RocAuc),
    )
}

fn prc_metrics() -> Option<MetricSet> {
    Some(
        MetricSet::new()
            .with("binary_accuracy", Metric::BinaryAccuracy)
            .with("prc_auc", Metric::PrcAuc),
    )
}

fn single(name: &str, metric: Metric) -> Option<MetricSet> {
    Some(MetricSet::new().with(name, metric))
}

fn one_file_csv(
    url: String,
    smiles_column: &str,
    metrics: Option<MetricSet>,
    split: SplitStrategy,
    task_type: TaskType,
    tasks: TaskColumns,
) -> DatasetDescriptor {
    DatasetDescriptor {
        dataset_type: DatasetType::OneFileCsv,
        url: DatasetUrl::Single { url },
        subsets: None,
        smiles_column: smiles_column.to_string(),
        metrics,
        loss: None,
        split,
        task_type,
        tasks,
    }
}

fn listed(names: &[&str]) -> TaskColumns {
    TaskColumns::listed(names.iter().copied())
}

fn pdbbind_urls(file_for: impl Fn(&str) -> String) -> DatasetUrl {
    DatasetUrl::BySubset {
        urls: PDBBIND_SUBSETS
            .iter()
            .map(|subset| SubsetUrl {
                subset: subset.to_string(),
                url: file_for(*subset),
            })
            .collect(),
    }
}

/// Build every built-in descriptor against the given mirrors.
pub fn molnet_catalog(sources: &SourceConfig) -> Vec<(&'static str, DatasetDescriptor)> {
    use SplitStrategy::{Random, Scaffold, Stratified, Time};
    use TaskType::{Classification, Mix, Regression};

    let m = |file: &str| sources.molnet(file);

    vec![
        (
            "bace_Class",
            one_file_csv(
                m("bace.csv"),
                "mol",
                roc_metrics(),
                Random,
                Classification,
                listed(&["Class"]),
            ),
        ),
        (
            "bace_pIC50",
            one_file_csv(
                m("bace.csv"),
                "mol",
                single("MAE", Metric::Mae),
                Random,
                Regression,
                listed(&["pIC50"]),
            ),
        ),
        (
            "bbbp",
            one_file_csv(
                m("BBBP.csv"),
                "smiles",
                roc_metrics(),
                Scaffold,
                Classification,
                listed(&["p_np"]),
            ),
        ),
        // Only the 5-threshold file; its tasks are every column but smiles.
        (
            "chembl",
            one_file_csv(
                m("chembl_5thresh.csv.gz"),
                "smiles",
                None,
                Random,
                Mix,
                TaskColumns::header_except("smiles"),
            ),
        ),
        (
            "clearance",
            one_file_csv(
                m("clearance.csv"),
                "smile",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(&["target"]),
            ),
        ),
        (
            "clintox",
            one_file_csv(
                m("clintox.csv.gz"),
                "smiles",
                roc_metrics(),
                Random,
                Classification,
                listed(&["FDA_APPROVED", "CT_TOX"]),
            ),
        ),
        (
            "delaney",
            one_file_csv(
                m("delaney-processed.csv"),
                "smiles",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(&["measured log solubility in mols per litre"]),
            ),
        ),
        (
            "HIV",
            one_file_csv(
                m("HIV.csv"),
                "smiles",
                roc_metrics(),
                Scaffold,
                Classification,
                listed(&["HIV_active"]),
            ),
        ),
        // The smiles field names the CSV inside the archive.
        (
            "hopv",
            one_file_csv(
                m("hopv.tar.gz"),
                "hopv.csv",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(HOPV_TASKS),
            ),
        ),
        (
            "kaggle",
            DatasetDescriptor {
                dataset_type: DatasetType::SeparateCsv,
                url: DatasetUrl::TrainValidTest {
                    train: m("KAGGLE_training_disguised_combined_full.csv.gz"),
                    valid: m("KAGGLE_test1_disguised_combined_full.csv.gz"),
                    test: m("KAGGLE_test2_disguised_combined_full.csv.gz"),
                },
                subsets: None,
                smiles_column: "smiles".into(),
                metrics: single("RMSE", Metric::Rmse),
                loss: None,
                split: Random,
                task_type: Regression,
                tasks: listed(KAGGLE_TASKS),
            },
        ),
        (
            "lipo",
            one_file_csv(
                m("Lipophilicity.csv"),
                "smiles",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(&["exp"]),
            ),
        ),
        (
            "muv",
            one_file_csv(
                m("muv.csv.gz"),
                "smiles",
                prc_metrics(),
                Random,
                Classification,
                listed(MUV_TASKS),
            ),
        ),
        (
            "nci",
            one_file_csv(
                m("nci_unique.csv"),
                "smiles",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(NCI_TASKS),
            ),
        ),
        (
            "pcba",
            one_file_csv(
                m("pcba.csv.gz"),
                "smiles",
                prc_metrics(),
                Random,
                Classification,
                listed(PCBA_TASKS),
            ),
        ),
        (
            "pdbbind_smiles",
            DatasetDescriptor {
                dataset_type: DatasetType::OneFileCsv,
                url: pdbbind_urls(|subset| sources.molnet(&format!("{subset}_smiles_labels.csv"))),
                subsets: Some(PDBBIND_SUBSETS.iter().map(|s| s.to_string()).collect()),
                smiles_column: "smiles".into(),
                metrics: single("R2", Metric::R2),
                loss: None,
                split: Time,
                task_type: Regression,
                tasks: listed(&["-logKd/Ki"]),
            },
        ),
        (
            "pdbbind_grid",
            DatasetDescriptor {
                dataset_type: DatasetType::Joblib,
                url: pdbbind_urls(|subset| sources.featurized(&format!("{subset}_grid.tar.gz"))),
                subsets: Some(PDBBIND_SUBSETS.iter().map(|s| s.to_string()).collect()),
                smiles_column: String::new(),
                metrics: single("R2", Metric::R2),
                loss: None,
                split: Time,
                task_type: Regression,
                tasks: listed(&["-logKd/Ki"]),
            },
        ),
        (
            "ppb",
            one_file_csv(
                m("PPB.csv"),
                "smiles",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(&["exp"]),
            ),
        ),
        (
            "qm7",
            one_file_csv(
                m("qm7.csv"),
                "smiles",
                single("MAE", Metric::Mae),
                Stratified,
                Regression,
                listed(&["u0_atom"]),
            ),
        ),
        (
            "qm8",
            one_file_csv(
                m("qm8.csv"),
                "smiles",
                single("MAE", Metric::Mae),
                Random,
                Regression,
                listed(QM8_TASKS),
            ),
        ),
        (
            "qm9",
            one_file_csv(
                m("qm9.csv"),
                "smiles",
                single("MAE", Metric::Mae),
                Random,
                Regression,
                listed(QM9_TASKS),
            ),
        ),
        (
            "SAMPL",
            one_file_csv(
                m("SAMPL.csv"),
                "smiles",
                single("RMSE", Metric::Rmse),
                Random,
                Regression,
                listed(&["expt"]),
            ),
        ),
        (
            "sider",
            one_file_csv(
                m("sider.csv.gz"),
                "smiles",
                roc_metrics(),
                Random,
                Classification,
                listed(SIDER_TASKS),
            ),
        ),
        (
            "tox21",
            one_file_csv(
                m("tox21.csv.gz"),
                "smiles",
                roc_metrics(),
                Random,
                Classification,
                listed(TOX21_TASKS),
            ),
        ),
        (
            "toxcast",
            DatasetDescriptor {
                loss: Some(Loss::SigmoidCrossEntropy),
                ..one_file_csv(
                    m("toxcast_data.csv.gz"),
                    "smiles",
                    roc_metrics(),
                    Random,
                    Classification,
                    TaskColumns::header_except("smiles"),
                )
            },
        ),
    ]
}
