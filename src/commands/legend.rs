use crate::core::{
    colors::{format_legend_line, paint},
    git_status::StatusCode,
    output::print_section_header,
    state::AssetColor,
};

pub fn execute_legend() {
    print_section_header("Status colors");
    for status in StatusCode::ALL {
        println!("{}", format_legend_line(status));
    }
    println!(
        "[  ]  {:<10} {}",
        "unchanged",
        paint(AssetColor::Black.as_str(), AssetColor::Black)
    );
    println!();
}
