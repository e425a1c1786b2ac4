//! Static translation tables (Turkish and English).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::genome::{Organism, OutputType, Tissue};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    /// Name of the language in itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Tr => "Türkçe",
            Language::En => "English",
        }
    }

    pub fn toggled(self) -> Language {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn t(self, msg: Msg) -> &'static str {
        match self {
            Language::Tr => tr(msg),
            Language::En => en(msg),
        }
    }

    pub fn organism(self, organism: Organism) -> &'static str {
        match organism {
            Organism::Human => self.t(Msg::Human),
            Organism::Mouse => self.t(Msg::Mouse),
        }
    }

    pub fn tissue(self, tissue: Tissue) -> &'static str {
        match (self, tissue) {
            (Language::Tr, Tissue::Lung) => "Akciğer",
            (Language::Tr, Tissue::Brain) => "Beyin",
            (Language::Tr, Tissue::Liver) => "Karaciğer",
            (Language::Tr, Tissue::Spleen) => "Dalak",
            (Language::Tr, Tissue::Kidney) => "Böbrek",
            (Language::Tr, Tissue::Heart) => "Kalp",
            (Language::Tr, Tissue::Colon) => "Kolon",
            (Language::En, Tissue::Lung) => "Lung",
            (Language::En, Tissue::Brain) => "Brain",
            (Language::En, Tissue::Liver) => "Liver",
            (Language::En, Tissue::Spleen) => "Spleen",
            (Language::En, Tissue::Kidney) => "Kidney",
            (Language::En, Tissue::Heart) => "Heart",
            (Language::En, Tissue::Colon) => "Colon",
        }
    }

    pub fn output_type(self, output: OutputType) -> &'static str {
        match (self, output) {
            (Language::Tr, OutputType::RnaSeq) => "RNA-seq (Gen Ekspresyonu)",
            (Language::Tr, OutputType::Dnase) => "DNase-seq (DNA Erişilebilirliği)",
            (Language::Tr, OutputType::Atac) => "ATAC-seq (Kromatin Erişilebilirliği)",
            (Language::Tr, OutputType::Cage) => "CAGE-seq (Transkripsiyon Başlangıcı)",
            (Language::Tr, OutputType::ChipHistone) => "ChIP-seq Histon Modifikasyonları",
            (Language::En, OutputType::RnaSeq) => "RNA-seq (Gene Expression)",
            (Language::En, OutputType::Dnase) => "DNase-seq (DNA Accessibility)",
            (Language::En, OutputType::Atac) => "ATAC-seq (Chromatin Accessibility)",
            (Language::En, OutputType::Cage) => "CAGE-seq (Transcription Start)",
            (Language::En, OutputType::ChipHistone) => "ChIP-seq Histone Modifications",
        }
    }
}

/// Translatable message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Title,
    Subtitle,
    ApiKey,
    ApiKeyHelp,
    Language,
    SequenceAnalysis,
    VariantAnalysis,
    IntervalAnalysis,
    Sequence,
    SequencePlaceholder,
    SequenceLength,
    MinLengthWarning,
    Organism,
    Human,
    Mouse,
    Tissue,
    OutputType,
    Chromosome,
    Position,
    Reference,
    Alternate,
    Start,
    End,
    Results,
    Analyzing,
    Error,
    Success,
    NoApiKey,
    InvalidSequence,
    SameBases,
    StartAfterEnd,
    InvalidNumber,
    ServiceStatus,
    ServiceReady,
    ClientNotConfigured,
    NonCommercial,
    NoResults,
    Saved,
    Loaded,
    ExampleLoaded,
    Cleared,
    Bytes,
    NothingToExport,
    UnknownCommand,
    UnknownLanguage,
    UnknownTab,
    Help,
    HelpFields,
    HelpChoices,
    HelpEdit,
    HelpTabs,
    HelpAnalyze,
    HelpExample,
    HelpClear,
    HelpSave,
    HelpLanguage,
    HelpKey,
    HelpSaveAs,
    HelpLoad,
    HelpSetLanguage,
    HelpQuit,
}

fn tr(msg: Msg) -> &'static str {
    match msg {
        Msg::Title => "AlphaGenome DNA Analiz Aracı",
        Msg::Subtitle => "Genomik tahmin servisi ile sekans, varyant ve bölge analizleri",
        Msg::ApiKey => "API Anahtarı",
        Msg::ApiKeyHelp => "API anahtarını girmek için alanı seçip 'i' tuşuna basın",
        Msg::Language => "Dil",
        Msg::SequenceAnalysis => "Sekans Analizi",
        Msg::VariantAnalysis => "Varyant Tahmini",
        Msg::IntervalAnalysis => "Bölge Analizi",
        Msg::Sequence => "DNA Sekansı",
        Msg::SequencePlaceholder => "DNA sekansınızı girin (A, T, G, C, N)...",
        Msg::SequenceLength => "Sekans Uzunluğu",
        Msg::MinLengthWarning => "Minimum 16,384 baz çifti gerekli",
        Msg::Organism => "Organizma",
        Msg::Human => "İnsan",
        Msg::Mouse => "Fare",
        Msg::Tissue => "Doku/Hücre Tipi",
        Msg::OutputType => "Çıktı Türü",
        Msg::Chromosome => "Kromozom",
        Msg::Position => "Pozisyon",
        Msg::Reference => "Referans Baz",
        Msg::Alternate => "Alternatif Baz",
        Msg::Start => "Başlangıç",
        Msg::End => "Bitiş",
        Msg::Results => "Sonuçlar",
        Msg::Analyzing => "Analiz yapılıyor...",
        Msg::Error => "Hata",
        Msg::Success => "Başarılı",
        Msg::NoApiKey => "Lütfen önce API anahtarınızı girin",
        Msg::InvalidSequence => "Geçersiz DNA sekansı",
        Msg::SameBases => "Referans ve alternatif bazlar farklı olmalıdır",
        Msg::StartAfterEnd => "Başlangıç pozisyonu bitiş pozisyonundan küçük olmalıdır",
        Msg::InvalidNumber => "Geçersiz sayı",
        Msg::ServiceStatus => "Servis",
        Msg::ServiceReady => "Hazır",
        Msg::ClientNotConfigured => "Tahmin servisi istemcisi yapılandırılmamış. genome-tui.toml dosyasında `endpoint` değerini veya GENOME_TUI_ENDPOINT ortam değişkenini ayarlayıp uygulamayı yeniden başlatın.",
        Msg::NonCommercial => "Ticari amaçlar için kullanılamaz. Yalnızca akademik ve araştırma amaçlıdır.",
        Msg::NoResults => "Henüz sonuç yok",
        Msg::Saved => "Kaydedildi",
        Msg::Loaded => "Yüklendi",
        Msg::ExampleLoaded => "Örnek yüklendi",
        Msg::Cleared => "Temizlendi",
        Msg::Bytes => "bayt",
        Msg::NothingToExport => "Dışa aktarılacak sonuç yok: son analiz başarısız oldu",
        Msg::UnknownCommand => "Bilinmeyen komut",
        Msg::UnknownLanguage => "Bilinmeyen dil",
        Msg::UnknownTab => "Bilinmeyen sekme",
        Msg::Help => "Yardım",
        Msg::HelpFields => "sonraki/önceki alan",
        Msg::HelpChoices => "önceki/sonraki seçenek",
        Msg::HelpEdit => "metin alanını düzenle (bitirmek için Esc)",
        Msg::HelpTabs => "analiz türünü değiştir",
        Msg::HelpAnalyze => "analiz et",
        Msg::HelpExample => "örnek yükle",
        Msg::HelpClear => "temizle",
        Msg::HelpSave => "sonucu JSON olarak kaydet",
        Msg::HelpLanguage => "dili değiştir",
        Msg::HelpKey => "API anahtarını ayarla",
        Msg::HelpSaveAs => "sonucu dosyaya kaydet",
        Msg::HelpLoad => "FASTA veya metin sekansı yükle",
        Msg::HelpSetLanguage => "dili ayarla",
        Msg::HelpQuit => "çıkış",
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::Title => "AlphaGenome DNA Analysis Tool",
        Msg::Subtitle => "Sequence, variant and region analysis with a genomic prediction service",
        Msg::ApiKey => "API Key",
        Msg::ApiKeyHelp => "Select the field and press 'i' to enter your API key",
        Msg::Language => "Language",
        Msg::SequenceAnalysis => "Sequence Analysis",
        Msg::VariantAnalysis => "Variant Prediction",
        Msg::IntervalAnalysis => "Region Analysis",
        Msg::Sequence => "DNA Sequence",
        Msg::SequencePlaceholder => "Enter your DNA sequence (A, T, G, C, N)...",
        Msg::SequenceLength => "Sequence Length",
        Msg::MinLengthWarning => "Minimum 16,384 base pairs required",
        Msg::Organism => "Organism",
        Msg::Human => "Human",
        Msg::Mouse => "Mouse",
        Msg::Tissue => "Tissue/Cell Type",
        Msg::OutputType => "Output Type",
        Msg::Chromosome => "Chromosome",
        Msg::Position => "Position",
        Msg::Reference => "Reference Base",
        Msg::Alternate => "Alternate Base",
        Msg::Start => "Start",
        Msg::End => "End",
        Msg::Results => "Results",
        Msg::Analyzing => "Analyzing...",
        Msg::Error => "Error",
        Msg::Success => "Success",
        Msg::NoApiKey => "Please enter your API key first",
        Msg::InvalidSequence => "Invalid DNA sequence",
        Msg::SameBases => "Reference and alternate bases must be different",
        Msg::StartAfterEnd => "Start position must be less than end position",
        Msg::InvalidNumber => "Invalid number",
        Msg::ServiceStatus => "Service",
        Msg::ServiceReady => "Ready",
        Msg::ClientNotConfigured => "Prediction service client not configured. Set `endpoint` in genome-tui.toml or the GENOME_TUI_ENDPOINT environment variable and restart.",
        Msg::NonCommercial => "Not for commercial use. For academic and research purposes only.",
        Msg::NoResults => "No results yet",
        Msg::Saved => "Saved",
        Msg::Loaded => "Loaded",
        Msg::ExampleLoaded => "Example loaded",
        Msg::Cleared => "Cleared",
        Msg::Bytes => "bytes",
        Msg::NothingToExport => "Nothing to export: the last analysis did not succeed",
        Msg::UnknownCommand => "Unknown command",
        Msg::UnknownLanguage => "Unknown language",
        Msg::UnknownTab => "Unknown tab",
        Msg::Help => "Help",
        Msg::HelpFields => "next/previous field",
        Msg::HelpChoices => "previous/next choice",
        Msg::HelpEdit => "edit text field (Esc to stop)",
        Msg::HelpTabs => "switch analysis",
        Msg::HelpAnalyze => "analyze",
        Msg::HelpExample => "load example",
        Msg::HelpClear => "clear",
        Msg::HelpSave => "save result as JSON",
        Msg::HelpLanguage => "toggle language",
        Msg::HelpKey => "set API key",
        Msg::HelpSaveAs => "save result to file",
        Msg::HelpLoad => "load FASTA or text sequence",
        Msg::HelpSetLanguage => "set language",
        Msg::HelpQuit => "quit",
    }
}
