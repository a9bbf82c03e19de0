use upversion_bin_shared::GameConsts;

pub const GAME_CONSTS: &GameConsts = &GameConsts {
    name: "Hearts of Iron 4",
    name_short: "HOI4",
    app_id: "394360",
    paradox_dir: "Hearts of Iron IV",
    path_var: "HOI4_PATH",
};
