//! Fixed Prinex bulk-load template and the Payhawk export columns the mapper reads.

pub const PRINEX_COLUMNS: [&str; 93] = [
    "SOCIEDAD",
    "ORDEN",
    "CIF",
    "CODIGO",
    "NUM.FRA",
    "FECHA.FRA",
    "FECHA.CONTABLE",
    "DIARIO_CONTB",
    "IMP.BRUTO",
    "TOTAL",
    "OP.ALQ",
    "D347",
    "TIPO.FRA",
    "SUJ_RECC",
    "DELEGACION",
    "BASE_RETENCION",
    "PORCENTAJE_RETENCION",
    "IMPORTE_RETENCION",
    "APLICAR_RETENCION",
    "BASE_IRPF",
    "PORCENTAJE_IRPF",
    "IMPORTE_IRPF",
    "CLAVE_IRPF",
    "SUBCLAVE_IRPF",
    "CEUTA",
    "CONCEPTO",
    "CTA_ACREEDORA",
    "SCTA_ACREEDORA",
    "CTA_GARANTIA",
    "SCTA_GARANTIA",
    "CTA_IRPF",
    "SCTA_IRPF",
    "CTA_IVAD",
    "SCTA_IVAD",
    "CONDICIONES",
    "PAGADA",
    "CTA_BANCO",
    "SCTA_BANCO",
    "APUNTE",
    "AUTOREPE_INVE_SUJE_PASI",
    "SERIE_AUTOREPE",
    "DIARIO_AUTOREPE",
    "TIPO_FRA_SII",
    "CLAVE_RE",
    "CLAVE_RE_AD1",
    "CLAVE_RE_AD2",
    "TIPO_OP_INTRA",
    "DESC_BIENES",
    "DESCRIPCION_OP",
    "SIMPLIFICADA",
    "FRA_SIMPLI_IDEN",
    "BIEN_ART25",
    "DOCU_ART25",
    "PROT_ART25",
    "NOTA_ART25",
    "DIARIO1",
    "BASE1",
    "IVA1",
    "CUOTA1",
    "DIARIO2",
    "BASE2",
    "IVA2",
    "CUOTA2",
    "DIARIO3",
    "BASE3",
    "IVA3",
    "CUOTA3",
    "DIARIO4",
    "BASE4",
    "IVA4",
    "CUOTA4",
    "DIARIO5",
    "BASE5",
    "IVA5",
    "CUOTA5",
    "PROYECTO",
    "TIPO_INMUEBLE",
    "CLAVE1",
    "CLAVE2",
    "CLAVE3",
    "CLAVE4",
    "IMPORTE_GASTO",
    "TIPO_PARTIDA",
    "APARTADO",
    "CAPITULO",
    "PARTIDA",
    "CTA_GASTO",
    "SCTA_GASTO",
    "COD_COEF",
    "NOMBRE",
    "CARACTERISTICA",
    "RUTA",
    "ETAPA",
];

pub const COLUMN_COUNT: usize = PRINEX_COLUMNS.len();

pub fn column_index(name: &str) -> Option<usize> {
    PRINEX_COLUMNS.iter().position(|column| *column == name)
}

/// Literal column values every row starts with.
pub enum Constant {
    Number(f64),
    Text(&'static str),
}

pub const CONSTANTS: [(&str, Constant); 14] = [
    ("SOCIEDAD", Constant::Number(666.0)),
    ("DIARIO_CONTB", Constant::Number(1.0)),
    ("OP.ALQ", Constant::Text("N")),
    ("D347", Constant::Text("N")),
    ("DIARIO1", Constant::Number(1.0)),
    ("PAGADA", Constant::Text("S")),
    ("CTA_BANCO", Constant::Text("5720")),
    ("SCTA_BANCO", Constant::Text("001")),
    ("APUNTE", Constant::Text("S")),
    ("CARACTERISTICA", Constant::Text("PAYHAWK")),
    ("CONDICIONES", Constant::Text("COMPTAT")),
    ("RUTA", Constant::Number(9.0)),
    ("ETAPA", Constant::Text("CARGA PAYHAWK")),
    ("CODIGO", Constant::Number(4444.0)),
];

pub mod source {
    pub const EXPENSE_ID: &str = "Expense ID";
    pub const DOCUMENT_TYPE: &str = "Document Type";
    pub const PAYMENT_TYPE: &str = "Payment Type";
    pub const NET_AMOUNT: &str = "Net Amount (EUR)";
    pub const TOTAL_AMOUNT: &str = "Total Amount (EUR)";
    pub const TAX_RATE: &str = "Tax Rate %";
    pub const TAX_AMOUNT: &str = "Tax Amount (EUR)";
    pub const DOCUMENT_NUMBER: &str = "Document Number";
    pub const DOCUMENT_DATE: &str = "Document Date";
    pub const ACCOUNT_CODE: &str = "Account Code";
    pub const PROJECT_ID: &str = "Promoción External ID";
    pub const FILE_NAME: &str = "File Name 1";

    /// Columns classification cannot work without.
    pub const REQUIRED: [&str; 2] = [DOCUMENT_TYPE, PAYMENT_TYPE];
}

/// Prinex column <- Payhawk column, copied verbatim when the source column exists.
pub const DIRECT_COPIES: [(&str, &str); 10] = [
    ("ORDEN", source::EXPENSE_ID),
    ("NUM.FRA", source::DOCUMENT_NUMBER),
    ("IMP.BRUTO", source::NET_AMOUNT),
    ("TOTAL", source::TOTAL_AMOUNT),
    ("BASE1", source::NET_AMOUNT),
    ("IVA1", source::TAX_RATE),
    ("CUOTA1", source::TAX_AMOUNT),
    ("PROYECTO", source::PROJECT_ID),
    ("IMPORTE_GASTO", source::NET_AMOUNT),
    ("NOMBRE", source::FILE_NAME),
];
