use clap::{Args, Parser, Subcommand};
use opportunity_common::{Action, SortDirection, SortKey, SortState, ViewState};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opportunity-finder")]
#[command(about = "若者向け募集情報（インターン・ワークショップ・イベント・ボランティア）の検索とお気に入り出力", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 募集一覧を絞り込み・並べ替えて表示
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// 絞り込み済みのお気に入りを favorites.csv に出力
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント/favorites.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 現在地（距離ソート用）の管理
    Location {
        #[command(subcommand)]
        action: LocationCommand,
    },

    /// 設定を表示/編集
    Config {
        /// FirestoreのプロジェクトIDを設定
        #[arg(long)]
        set_project: Option<String>,

        /// Firestore APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// コレクション名を設定
        #[arg(long)]
        set_collection: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum LocationCommand {
    /// 住所・郵便番号、または緯度経度で現在地を設定
    Set {
        /// 住所・郵便番号（例: 48104 / "Austin, TX"）。省略時は対話入力
        address: Option<String>,

        /// 緯度（--lng と併用）
        #[arg(long, requires = "lng", conflicts_with = "address", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// 経度（--lat と併用）
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// 表示ラベル
        #[arg(long)]
        label: Option<String>,
    },

    /// 保存済みの現在地を表示
    Show,

    /// 現在地を削除
    Clear,
}

/// 一覧表示・出力で共通の条件
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// 入力JSONファイル（省略時はFirestoreから取得）
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 業界タグ（複数指定でOR）
    #[arg(long = "industry")]
    pub industries: Vec<String>,

    /// 対象年齢（複数指定でOR）
    #[arg(long = "age-group")]
    pub age_groups: Vec<String>,

    /// 種類（複数指定でOR）
    #[arg(long = "type")]
    pub opportunity_types: Vec<String>,

    /// 名称・団体名・所在地の部分一致検索
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// リモートのみ
    #[arg(long)]
    pub remote_only: bool,

    /// お気に入りに追加するID（複数指定可）
    #[arg(short = 'f', long = "favorite")]
    pub favorites: Vec<String>,

    /// お気に入りのみ表示
    #[arg(long)]
    pub favorites_only: bool,

    /// ソートキー (name/organization/date/distance/none)
    #[arg(long, default_value = "none")]
    pub sort: SortKey,

    /// 降順
    #[arg(long)]
    pub desc: bool,
}

/// 同じ値を2回指定すると解除になるので重複は除く
fn unique(values: &[String]) -> impl Iterator<Item = String> + '_ {
    let mut seen = HashSet::new();
    values.iter().filter(move |v| seen.insert(v.as_str())).cloned()
}

impl ViewArgs {
    /// 引数を画面状態のアクション列に変換
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        actions.extend(unique(&self.industries).map(Action::ToggleIndustry));
        actions.extend(unique(&self.age_groups).map(Action::ToggleAgeGroup));
        actions.extend(unique(&self.opportunity_types).map(Action::ToggleOpportunityType));
        actions.push(Action::SetSearch(self.search.clone()));
        actions.push(Action::ShowRemoteOnly(self.remote_only));
        actions.push(Action::ShowOnlyFavorites(self.favorites_only));
        actions.extend(unique(&self.favorites).map(Action::ToggleFavorite));

        actions.push(Action::SetSort(SortState {
            key: self.sort,
            direction: if self.desc { SortDirection::Desc } else { SortDirection::Asc },
        }));
        actions
    }

    pub fn view_state(&self, base: ViewState) -> ViewState {
        self.actions().into_iter().fold(base, ViewState::apply)
    }
}
